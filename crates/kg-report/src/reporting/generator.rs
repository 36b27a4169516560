use crate::config::ReportConfig;
use crate::error::{ResultExt, Result};
use crate::reporting::ReportBuilder;
use crate::sections::{Section, VISUALIZATION_TITLE, default_sections, write_visualization_section};
use crate::types::AnalysisData;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Level-1 title at the top of every report.
pub const REPORT_TITLE: &str = "Arbitrum Documentation Knowledge Graph - Phase 1 Analysis Report";

/// How a single section fared during the most recent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Success,
    /// The section failed; carries the error message shown in the report.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub title: String,
    pub outcome: SectionOutcome,
}

/// Composes the Markdown report and writes it to disk.
///
/// Sections run one after another in registration order. A section that
/// fails is replaced in the report by a warning block; every other section
/// and the report as a whole still complete.
///
/// # Example
///
/// ```rust,ignore
/// use kg_report::{AnalysisData, MarkdownReportGenerator, ReportConfig};
///
/// let data = AnalysisData::from_json_str(&std::fs::read_to_string("analysis.json")?)?;
/// let mut generator = MarkdownReportGenerator::new(ReportConfig::default());
/// let path = generator.generate(&data).await?;
/// println!("Report written to {}", path.display());
/// ```
pub struct MarkdownReportGenerator {
    config: ReportConfig,
    builder: ReportBuilder,
    sections: Vec<Box<dyn Section>>,
    outcomes: Vec<SectionReport>,
}

// Generation futures may be moved onto a runtime worker thread.
static_assertions::assert_impl_all!(MarkdownReportGenerator: Send);

impl Default for MarkdownReportGenerator {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl MarkdownReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            builder: ReportBuilder::new(),
            sections: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Mutable access to the configuration. Changes apply from the next
    /// `generate()` call.
    pub fn config_mut(&mut self) -> &mut ReportConfig {
        &mut self.config
    }

    /// Register a custom section. If any section is registered before the
    /// first run, the built-in sections are not added.
    pub fn register_section(&mut self, section: Box<dyn Section>) -> &mut Self {
        self.sections.push(section);
        self
    }

    /// Titles of the registered sections, in order. Empty until the first
    /// run unless sections were registered explicitly.
    pub fn section_titles(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.title().to_string()).collect()
    }

    /// Per-section outcomes of the most recent run.
    pub fn section_outcomes(&self) -> &[SectionReport] {
        &self.outcomes
    }

    /// Content of the most recent run.
    pub fn builder(&self) -> &ReportBuilder {
        &self.builder
    }

    fn ensure_sections_registered(&mut self) {
        if self.sections.is_empty() {
            self.sections = default_sections();
            debug!("Registered {} default sections", self.sections.len());
        }
    }

    /// Compose the report and return it as Markdown without writing it.
    pub async fn render(&mut self, data: &AnalysisData) -> Result<String> {
        data.validate()?;
        self.config.validate()?;

        self.builder.reset();
        self.outcomes.clear();

        info!(
            "Composing report for {} documents and {} concepts",
            data.document_count(),
            data.concept_count()
        );

        self.builder.add_title(REPORT_TITLE);
        self.builder.add_metadata([
            (
                "generatedAt",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            ("documentsAnalyzed", data.document_count().to_string()),
            ("conceptsExtracted", data.concept_count().to_string()),
            ("graphNodes", data.total_nodes().to_string()),
            ("graphEdges", data.total_edges().to_string()),
        ]);

        self.ensure_sections_registered();

        if self.config.include_table_of_contents {
            let mut titles = self.section_titles();
            titles.push(VISUALIZATION_TITLE.to_string());
            self.builder.add_table_of_contents(&titles);
        }

        for section in &self.sections {
            let title = section.title().to_string();
            debug!("Generating section: {}", title);

            // Each section writes to its own buffer so a failure leaves no
            // partial content behind.
            let mut buffer = ReportBuilder::new();
            let outcome = match section.generate(data, &self.config, &mut buffer).await {
                Ok(()) => {
                    self.builder.append(buffer);
                    SectionOutcome::Success
                }
                Err(e) => {
                    warn!("Section '{}' failed: {}", title, e);
                    self.builder.add_warning(&format!(
                        "Failed to generate section \"{}\": {}",
                        title, e
                    ));
                    SectionOutcome::Failed(e.to_string())
                }
            };

            self.outcomes.push(SectionReport { title, outcome });
        }

        write_visualization_section(&mut self.builder);

        Ok(self.builder.build())
    }

    /// Compose the report, write it to the configured output path and
    /// return the absolute path of the written file.
    ///
    /// Parent directories are created as needed and an existing file is
    /// overwritten.
    pub async fn generate(&mut self, data: &AnalysisData) -> Result<PathBuf> {
        let content = self.render(data).await?;
        let output_path = Self::resolve_output_path(&self.config.output_path)?;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory {}", parent.display()))?;
        }

        tokio::fs::write(&output_path, content)
            .await
            .context(format!("Failed to write report {}", output_path.display()))?;

        let failed = self
            .outcomes
            .iter()
            .filter(|r| matches!(r.outcome, SectionOutcome::Failed(_)))
            .count();
        if failed > 0 {
            warn!("Report saved with {} failed section(s)", failed);
        }
        info!("Report saved: {}", output_path.display());

        Ok(output_path)
    }

    /// Same as [`generate`](Self::generate), starting from raw JSON.
    pub async fn generate_from_value(&mut self, value: &Value) -> Result<PathBuf> {
        let data = AnalysisData::from_value(value)?;
        self.generate(&data).await
    }

    fn resolve_output_path(path: &Path) -> Result<PathBuf> {
        std::path::absolute(path)
            .context(format!("Failed to resolve output path {}", path.display()))
    }
}
