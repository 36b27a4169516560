//! Ranked table of the most frequent concepts, with an optional category
//! breakdown and pie chart.

use super::{Section, SectionFuture};
use crate::config::ReportConfig;
use crate::error::SectionError;
use crate::formatters::{Alignment, DiagramType};
use crate::reporting::ReportBuilder;
use crate::types::{AnalysisData, Concept};
use crate::utils::percentage_of;
use serde_json::{Value, json};

pub const TOP_CONCEPTS_TITLE: &str = "Top Concepts";

/// Minimum number of shown concepts before a category breakdown is added.
pub const CATEGORY_BREAKDOWN_THRESHOLD: usize = 20;

/// Number of concepts plotted in the distribution pie chart.
pub const PIE_CHART_LIMIT: usize = 10;

const UNCATEGORIZED: &str = "uncategorized";

pub struct TopConceptsSection;

impl TopConceptsSection {
    fn write(
        data: &AnalysisData,
        config: &ReportConfig,
        builder: &mut ReportBuilder,
    ) -> Result<(), SectionError> {
        let all = data.top_concepts();
        // Input is already ordered by frequency.
        let shown = &all[..config.max_concepts_to_show.min(all.len())];

        builder.add_heading(TOP_CONCEPTS_TITLE);
        builder.add_paragraph(&format!(
            "The analysis identified **{} unique concepts** across the documentation. \
             The table below lists the top {} concepts ranked by frequency.",
            all.len(),
            shown.len()
        ));

        builder.add_table(
            &["Rank", "Concept", "Frequency", "Files", "Category", "Type"],
            &Self::concept_rows(shown),
            &[
                Alignment::Right,
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Left,
                Alignment::Left,
            ],
        );

        if shown.len() >= CATEGORY_BREAKDOWN_THRESHOLD {
            builder.add_subheading("Concept Categories");
            builder.add_paragraph(&format!(
                "Distribution of the top {} concepts by category:",
                shown.len()
            ));
            builder.add_table(
                &["Category", "Count", "Percentage"],
                &Self::category_rows(shown),
                &[Alignment::Left, Alignment::Right, Alignment::Right],
            );
        }

        if config.include_mermaid_diagrams {
            let slices: Vec<Value> = shown
                .iter()
                .take(PIE_CHART_LIMIT)
                .map(|c| json!({"label": c.concept, "value": c.frequency}))
                .collect();

            builder.add_subheading("Concept Distribution");
            builder.add_mermaid_diagram(DiagramType::Pie, &Value::Array(slices))?;
        }

        Ok(())
    }

    fn concept_rows(concepts: &[Concept]) -> Vec<Vec<Value>> {
        concepts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let category = c
                    .category
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .unwrap_or("N/A");
                let concept_type = c
                    .concept_type
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "general".to_string());

                vec![
                    (i + 1).into(),
                    c.concept.clone().into(),
                    format!("{:.1}", c.frequency).into(),
                    c.file_count.into(),
                    category.into(),
                    concept_type.into(),
                ]
            })
            .collect()
    }

    /// Group the shown concepts by category, largest group first. Groups of
    /// equal size keep first-seen order.
    fn category_rows(concepts: &[Concept]) -> Vec<Vec<Value>> {
        let mut groups: Vec<(&str, usize)> = Vec::new();
        for concept in concepts {
            let category = concept
                .category
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(UNCATEGORIZED);

            match groups.iter_mut().find(|(name, _)| *name == category) {
                Some((_, count)) => *count += 1,
                None => groups.push((category, 1)),
            }
        }
        // Presentation order only; readers should not rely on it. Stable, so
        // ties stay in first-seen order.
        groups.sort_by(|a, b| b.1.cmp(&a.1));

        groups
            .into_iter()
            .map(|(category, count)| {
                vec![
                    category.into(),
                    count.into(),
                    format!("{:.1}%", percentage_of(count, concepts.len())).into(),
                ]
            })
            .collect()
    }
}

impl Section for TopConceptsSection {
    fn title(&self) -> &str {
        TOP_CONCEPTS_TITLE
    }

    fn generate<'a>(
        &'a self,
        data: &'a AnalysisData,
        config: &'a ReportConfig,
        builder: &'a mut ReportBuilder,
    ) -> SectionFuture<'a> {
        Box::pin(async move { Self::write(data, config, builder) })
    }
}
