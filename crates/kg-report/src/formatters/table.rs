//! GitHub-flavored Markdown tables.

use crate::utils::value_to_text;
use serde_json::{Map, Value};

/// Column alignment for a Markdown table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Parse an alignment name. Anything unrecognized falls back to `Left`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    /// Separator-row marker for this alignment.
    pub fn marker(self) -> &'static str {
        match self {
            Alignment::Left => ":---",
            Alignment::Center => ":---:",
            Alignment::Right => "---:",
        }
    }
}

impl From<&str> for Alignment {
    fn from(name: &str) -> Self {
        Alignment::parse(name)
    }
}

/// Renders Markdown tables.
pub struct TableFormatter;

impl TableFormatter {
    /// Render a table with a header row, a separator row and one row per
    /// entry in `rows`.
    ///
    /// Returns an empty string when `headers` is empty. Columns without an
    /// entry in `alignment` are left-aligned. Rows are not checked against
    /// the header width: a ragged row renders as-is.
    pub fn format<H: AsRef<str>>(headers: &[H], rows: &[Vec<Value>], alignment: &[Alignment]) -> String {
        if headers.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);

        let header_cells: Vec<&str> = headers.iter().map(AsRef::as_ref).collect();
        lines.push(Self::row(&header_cells));

        let markers: Vec<&str> = (0..headers.len())
            .map(|i| alignment.get(i).copied().unwrap_or_default().marker())
            .collect();
        lines.push(Self::row(&markers));

        for row in rows {
            let cells: Vec<String> = row.iter().map(value_to_text).collect();
            lines.push(Self::row(&cells));
        }

        let mut table = lines.join("\n");
        table.push('\n');
        table
    }

    /// Render an object as a two-column `Property | Value` table, one row
    /// per key in the object's own order.
    pub fn format_key_value(data: &Map<String, Value>) -> String {
        let rows: Vec<Vec<Value>> = data
            .iter()
            .map(|(key, value)| vec![Value::String(key.clone()), Value::String(value_to_text(value))])
            .collect();

        Self::format(&["Property", "Value"], &rows, &[])
    }

    fn row<S: AsRef<str>>(cells: &[S]) -> String {
        let joined = cells.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" | ");
        format!("| {} |", joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_basic_table() {
        let table = TableFormatter::format(
            &["Name", "Count"],
            &[vec![json!("Rollup"), json!(42)], vec![json!("Gas"), json!(7)]],
            &[],
        );

        assert_eq!(
            table,
            "| Name | Count |\n| :--- | :--- |\n| Rollup | 42 |\n| Gas | 7 |\n"
        );
    }

    #[test]
    fn test_empty_headers_render_nothing() {
        let headers: [&str; 0] = [];
        assert_eq!(TableFormatter::format(&headers, &[vec![json!("x")]], &[]), "");
    }

    #[test]
    fn test_empty_rows_still_render_header_and_separator() {
        let table = TableFormatter::format(&["Metric", "Value"], &[], &[]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Metric"));
        assert!(lines[0].contains("Value"));
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn test_alignment_markers() {
        let table = TableFormatter::format(
            &["A", "B", "C", "D"],
            &[],
            &[Alignment::Right, Alignment::Center, Alignment::parse("diagonal")],
        );
        assert_eq!(table.lines().nth(1), Some("| ---: | :---: | :--- | :--- |"));
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!(Alignment::parse("center"), Alignment::Center);
        assert_eq!(Alignment::parse("RIGHT"), Alignment::Right);
        assert_eq!(Alignment::parse("left"), Alignment::Left);
        assert_eq!(Alignment::from("unknown"), Alignment::Left);
    }

    #[test]
    fn test_null_cells_are_empty() {
        let table = TableFormatter::format(&["A", "B"], &[vec![Value::Null, json!(true)]], &[]);
        assert_eq!(table.lines().nth(2), Some("|  | true |"));
    }

    #[test]
    fn test_ragged_rows_render_as_is() {
        let table = TableFormatter::format(
            &["A", "B"],
            &[vec![json!("only")], vec![json!(1), json!(2), json!(3)]],
            &[],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[2], "| only |");
        assert_eq!(lines[3], "| 1 | 2 | 3 |");
    }

    #[test]
    fn test_key_value_table() {
        let mut data = Map::new();
        data.insert("name".to_string(), json!("arbitrum-docs"));
        data.insert("documents".to_string(), json!(20));
        data.insert("tags".to_string(), json!(["l2", "rollup"]));
        data.insert("owner".to_string(), Value::Null);

        let table = TableFormatter::format_key_value(&data);
        assert_eq!(
            table,
            "| Property | Value |\n\
             | :--- | :--- |\n\
             | name | arbitrum-docs |\n\
             | documents | 20 |\n\
             | tags | [\"l2\",\"rollup\"] |\n\
             | owner |  |\n"
        );
    }
}
