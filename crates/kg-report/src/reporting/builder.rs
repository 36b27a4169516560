//! Append-only Markdown document builder.
//!
//! A [`ReportBuilder`] holds an ordered list of content blocks. Every
//! composition method appends one or more blocks; nothing is ever reordered
//! or deduplicated. [`ReportBuilder::build`] joins the blocks with single
//! newlines and leaves the builder untouched, so it can be called again or
//! extended further.

use crate::formatters::{Alignment, DiagramType, MermaidError, MermaidFormatter, TableFormatter};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt::Display;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

/// Title of the table-of-contents heading.
pub const TABLE_OF_CONTENTS_TITLE: &str = "Table of Contents";

/// Anchor for a heading: lower-cased, with each whitespace run replaced by a
/// single hyphen. Punctuation is kept as-is.
pub fn anchor_for(title: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&title.to_lowercase(), "-")
        .into_owned()
}

/// Ordered sequence of Markdown content blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBuilder {
    blocks: Vec<String>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Headings
    // ------------------------------------------------------------------

    /// Level-1 heading.
    pub fn add_title(&mut self, text: &str) -> &mut Self {
        self.add_heading_level(1, text)
    }

    /// Level-2 heading.
    pub fn add_heading(&mut self, text: &str) -> &mut Self {
        self.add_heading_level(2, text)
    }

    /// Level-3 heading.
    pub fn add_subheading(&mut self, text: &str) -> &mut Self {
        self.add_heading_level(3, text)
    }

    /// Heading at an arbitrary level. Levels are not clamped.
    pub fn add_heading_level(&mut self, level: usize, text: &str) -> &mut Self {
        self.push(format!("{} {}\n", "#".repeat(level), text))
    }

    // ------------------------------------------------------------------
    // Body content
    // ------------------------------------------------------------------

    /// Raw paragraph text, no escaping or wrapping.
    pub fn add_paragraph(&mut self, text: &str) -> &mut Self {
        self.push(format!("{}\n", text))
    }

    /// Bulleted (`- item`) or numbered (`1. item`) list followed by a blank
    /// line. An empty list appends nothing.
    pub fn add_list<S: AsRef<str>>(&mut self, items: &[S], ordered: bool) -> &mut Self {
        if items.is_empty() {
            return self;
        }

        for (i, item) in items.iter().enumerate() {
            let line = if ordered {
                format!("{}. {}", i + 1, item.as_ref())
            } else {
                format!("- {}", item.as_ref())
            };
            self.blocks.push(line);
        }
        self.push(String::new())
    }

    /// Markdown table rendered by [`TableFormatter::format`].
    pub fn add_table<H: AsRef<str>>(
        &mut self,
        headers: &[H],
        rows: &[Vec<Value>],
        alignment: &[Alignment],
    ) -> &mut Self {
        self.push(TableFormatter::format(headers, rows, alignment))
    }

    /// Fenced code block. The language tag follows the fence directly.
    pub fn add_code_block(&mut self, code: &str, language: &str) -> &mut Self {
        self.blocks.push(format!("```{}", language));
        self.blocks.push(code.to_string());
        self.push("```\n".to_string())
    }

    /// Mermaid diagram wrapped in a ```` ```mermaid ```` fence.
    ///
    /// Nothing is appended if the diagram cannot be rendered.
    pub fn add_mermaid_diagram(
        &mut self,
        diagram_type: DiagramType,
        data: &Value,
    ) -> Result<&mut Self, MermaidError> {
        let diagram = MermaidFormatter::render(diagram_type, data)?;
        self.blocks.push("```mermaid".to_string());
        self.blocks.push(diagram);
        Ok(self.push("```\n".to_string()))
    }

    /// HTML comment carrying `key: value` metadata lines, in the order given.
    pub fn add_metadata<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        self.blocks.push("<!-- Report Metadata".to_string());
        for (key, value) in pairs {
            self.blocks.push(format!("{}: {}", key, value));
        }
        self.push("-->\n".to_string())
    }

    /// Level-2 "Table of Contents" heading followed by a numbered list of
    /// anchor links, one per title.
    pub fn add_table_of_contents<S: AsRef<str>>(&mut self, section_titles: &[S]) -> &mut Self {
        self.add_heading(TABLE_OF_CONTENTS_TITLE);

        let links: Vec<String> = section_titles
            .iter()
            .map(|title| format!("[{}](#{})", title.as_ref(), anchor_for(title.as_ref())))
            .collect();

        self.add_list(&links, true)
    }

    pub fn add_horizontal_rule(&mut self) -> &mut Self {
        self.push("---\n".to_string())
    }

    /// Blockquote prefixed with `**Warning**:`.
    pub fn add_warning(&mut self, text: &str) -> &mut Self {
        self.push(Self::callout("Warning", text))
    }

    /// Blockquote prefixed with `**Note**:`.
    pub fn add_info(&mut self, text: &str) -> &mut Self {
        self.push(Self::callout("Note", text))
    }

    /// Every line of `text` stays inside the blockquote.
    fn callout(label: &str, text: &str) -> String {
        let body = text.lines().collect::<Vec<_>>().join("\n> ");
        format!("> **{}**: {}\n", label, body)
    }

    /// Verbatim Markdown passthrough.
    pub fn add_section(&mut self, markdown: &str) -> &mut Self {
        self.push(markdown.to_string())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Move every block of `other` onto the end of this builder, in order.
    pub fn append(&mut self, other: ReportBuilder) -> &mut Self {
        self.blocks.extend(other.blocks);
        self
    }

    /// Remove all content.
    pub fn reset(&mut self) -> &mut Self {
        self.blocks.clear();
        self
    }

    /// Join all blocks with newlines. Does not modify the builder.
    pub fn build(&self) -> String {
        self.blocks.join("\n")
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn push(&mut self, block: String) -> &mut Self {
        self.blocks.push(block);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_heading_levels() {
        let mut builder = ReportBuilder::new();
        builder
            .add_title("Report")
            .add_heading("Section")
            .add_subheading("Details")
            .add_heading_level(6, "Deep");

        assert_eq!(
            builder.build(),
            "# Report\n\n## Section\n\n### Details\n\n###### Deep\n"
        );
    }

    #[test]
    fn test_paragraph_is_raw() {
        let mut builder = ReportBuilder::new();
        builder.add_paragraph("**bold** | not escaped");
        assert_eq!(builder.build(), "**bold** | not escaped\n");
    }

    #[test]
    fn test_unordered_list() {
        let mut builder = ReportBuilder::new();
        builder.add_list(&["one", "two"], false);
        assert_eq!(builder.build(), "- one\n- two\n");
    }

    #[test]
    fn test_ordered_list() {
        let mut builder = ReportBuilder::new();
        builder.add_list(&["one", "two", "three"], true);
        assert_eq!(builder.build(), "1. one\n2. two\n3. three\n");
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut builder = ReportBuilder::new();
        let items: [&str; 0] = [];
        builder.add_list(&items, false);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_code_block() {
        let mut builder = ReportBuilder::new();
        builder.add_code_block("npm run serve", "shell");
        assert_eq!(builder.build(), "```shell\nnpm run serve\n```\n");
    }

    #[test]
    fn test_code_block_without_language() {
        let mut builder = ReportBuilder::new();
        builder.add_code_block("plain", "");
        assert!(builder.build().starts_with("```\nplain\n"));
    }

    #[test]
    fn test_mermaid_diagram() {
        let mut builder = ReportBuilder::new();
        builder
            .add_mermaid_diagram(DiagramType::Pie, &json!([{"label": "Rollup", "value": 42}]))
            .unwrap();

        assert_eq!(
            builder.build(),
            "```mermaid\npie title Concept Distribution\n    \"Rollup\" : 42\n```\n"
        );
    }

    #[test]
    fn test_failed_mermaid_diagram_appends_nothing() {
        let mut builder = ReportBuilder::new();
        assert!(builder.add_mermaid_diagram(DiagramType::Graph, &Value::Null).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_metadata_comment() {
        let mut builder = ReportBuilder::new();
        builder.add_metadata([("documentsAnalyzed", 20), ("graphNodes", 30)]);
        assert_eq!(
            builder.build(),
            "<!-- Report Metadata\ndocumentsAnalyzed: 20\ngraphNodes: 30\n-->\n"
        );
    }

    #[test]
    fn test_table_of_contents() {
        let mut builder = ReportBuilder::new();
        builder.add_table_of_contents(&["Executive Summary", "Top  Concepts"]);

        assert_eq!(
            builder.build(),
            "## Table of Contents\n\n\
             1. [Executive Summary](#executive-summary)\n\
             2. [Top  Concepts](#top-concepts)\n"
        );
    }

    #[test]
    fn test_anchor_keeps_punctuation() {
        assert_eq!(anchor_for("Hub Documents"), "hub-documents");
        assert_eq!(anchor_for("Q&A / FAQ"), "q&a-/-faq");
        assert_eq!(anchor_for("Tabs\tand\nnewlines"), "tabs-and-newlines");
    }

    #[test]
    fn test_callouts_and_rule() {
        let mut builder = ReportBuilder::new();
        builder
            .add_warning("careful")
            .add_info("fyi")
            .add_horizontal_rule()
            .add_section("<details>raw</details>");

        assert_eq!(
            builder.build(),
            "> **Warning**: careful\n\n> **Note**: fyi\n\n---\n\n<details>raw</details>"
        );
    }

    #[test]
    fn test_multiline_callout_stays_quoted() {
        let mut builder = ReportBuilder::new();
        builder.add_warning("first line\nsecond line\r\nthird line");

        assert_eq!(
            builder.build(),
            "> **Warning**: first line\n> second line\n> third line\n"
        );
    }

    #[test]
    fn test_table_block() {
        let mut builder = ReportBuilder::new();
        builder.add_table(&["A"], &[vec![json!(1)]], &[]);
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.build(), "| A |\n| :--- |\n| 1 |\n");
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut builder = ReportBuilder::new();
        builder.add_title("Report").add_paragraph("Body");

        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);

        builder.add_paragraph("More");
        assert_ne!(builder.build(), first);
        assert!(builder.build().starts_with(&first));
    }

    #[test]
    fn test_reset_clears_content() {
        let mut builder = ReportBuilder::new();
        builder.add_title("Report");
        builder.reset();
        assert!(builder.is_empty());
        assert_eq!(builder.build(), "");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut main = ReportBuilder::new();
        main.add_heading("First");

        let mut private = ReportBuilder::new();
        private.add_heading("Second").add_paragraph("Body");

        main.append(private);
        assert_eq!(main.build(), "## First\n\n## Second\n\nBody\n");
    }
}
