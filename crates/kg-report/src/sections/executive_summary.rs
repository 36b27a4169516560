//! Executive summary: headline counts, key metrics and critical findings.

use super::{Section, SectionFuture};
use crate::config::ReportConfig;
use crate::formatters::Alignment;
use crate::reporting::ReportBuilder;
use crate::types::AnalysisData;
use crate::utils::{format_number, format_percentage};
use serde_json::Value;

pub const EXECUTIVE_SUMMARY_TITLE: &str = "Executive Summary";

pub struct ExecutiveSummarySection;

impl ExecutiveSummarySection {
    fn write(data: &AnalysisData, builder: &mut ReportBuilder) {
        builder.add_heading(EXECUTIVE_SUMMARY_TITLE);
        builder.add_paragraph(&format!(
            "This report presents the Phase 1 analysis of the Arbitrum documentation. \
             The analysis processed **{} documents**, extracted **{} concepts**, and built a \
             knowledge graph with **{} nodes** and **{} edges**.",
            data.document_count(),
            data.concept_count(),
            data.total_nodes(),
            data.total_edges(),
        ));

        builder.add_subheading("Key Metrics");
        builder.add_table(
            &["Metric", "Value"],
            &Self::metric_rows(data),
            &[Alignment::Left, Alignment::Right],
        );

        builder.add_subheading("Critical Findings");
        builder.add_list(&Self::findings(data), false);
    }

    fn metric_rows(data: &AnalysisData) -> Vec<Vec<Value>> {
        let quality = data
            .reportable_quality_score()
            .map(|score| format!("{}/100", format_number(score)))
            .unwrap_or_else(|| "N/A".to_string());

        vec![
            vec!["Documents Analyzed".into(), data.document_count().into()],
            vec!["Concepts Extracted".into(), data.concept_count().into()],
            vec!["Graph Nodes".into(), data.total_nodes().into()],
            vec!["Graph Edges".into(), data.total_edges().into()],
            vec!["Graph Density".into(), format_percentage(data.density()).into()],
            vec!["Average Degree".into(), format!("{:.2}", data.avg_degree()).into()],
            vec!["Quality Score".into(), quality.into()],
        ]
    }

    /// Each finding is optional and independent of the others.
    fn findings(data: &AnalysisData) -> Vec<String> {
        let mut findings = Vec::new();

        if let Some(top) = data.top_concepts().first() {
            findings.push(format!(
                "**{}** is the most mentioned concept with {} occurrences across {} files",
                top.concept,
                format_number(top.frequency),
                top.file_count
            ));
        }

        let orphans = data.orphan_count();
        if orphans > 0 {
            findings.push(format!(
                "{} orphaned documents have no links to or from other documents",
                orphans
            ));
        }

        match data.is_connected() {
            Some(true) => findings.push(
                "The documentation forms a fully connected knowledge graph".to_string(),
            ),
            Some(false) => findings.push(
                "The knowledge graph has disconnected components, suggesting isolated topics"
                    .to_string(),
            ),
            None => {}
        }

        if let Some(score) = data.reportable_quality_score() {
            findings.push(format!("Overall quality score: {}/100", format_number(score)));
        }

        findings
    }
}

impl Section for ExecutiveSummarySection {
    fn title(&self) -> &str {
        EXECUTIVE_SUMMARY_TITLE
    }

    fn generate<'a>(
        &'a self,
        data: &'a AnalysisData,
        _config: &'a ReportConfig,
        builder: &'a mut ReportBuilder,
    ) -> SectionFuture<'a> {
        Box::pin(async move {
            Self::write(data, builder);
            Ok(())
        })
    }
}
