//! Configuration types for report generation.
//!
//! A [`ReportConfig`] is resolved once per generator by merging caller
//! overrides over fixed defaults, either through the fluent
//! [`ReportConfigBuilder`] or from a partial JSON object.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the generated report.
pub const DEFAULT_OUTPUT_PATH: &str = "dist/PHASE1_ANALYSIS_REPORT.md";
/// Default number of concepts listed in the top-concepts table.
pub const DEFAULT_MAX_CONCEPTS: usize = 50;
/// Default number of hub documents listed.
pub const DEFAULT_MAX_HUBS: usize = 20;
/// Default number of orphaned documents listed.
pub const DEFAULT_MAX_ORPHANS: usize = 30;

/// Configuration for the Markdown report generator.
///
/// Keys are camelCase on the wire. Missing keys take their defaults and
/// unknown keys are ignored.
///
/// # Example
///
/// ```rust,ignore
/// use kg_report::config::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .output_path("out/report.md")
///     .max_concepts_to_show(10)
///     .include_mermaid_diagrams(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    /// Where the Markdown file is written. Relative paths resolve against
    /// the current working directory.
    /// Default: "dist/PHASE1_ANALYSIS_REPORT.md"
    pub output_path: PathBuf,

    /// Emit a table of contents after the metadata block.
    /// Default: true
    pub include_table_of_contents: bool,

    /// Emit Mermaid diagrams in sections that support them.
    /// Default: true
    pub include_mermaid_diagrams: bool,

    /// Maximum number of concepts shown in the top-concepts table.
    /// Default: 50
    pub max_concepts_to_show: usize,

    /// Maximum number of hub documents shown.
    /// Default: 20
    pub max_hubs_to_show: usize,

    /// Maximum number of orphaned documents shown.
    /// Default: 30
    pub max_orphans_to_show: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            include_table_of_contents: true,
            include_mermaid_diagrams: true,
            max_concepts_to_show: DEFAULT_MAX_CONCEPTS,
            max_hubs_to_show: DEFAULT_MAX_HUBS,
            max_orphans_to_show: DEFAULT_MAX_ORPHANS,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Parse a (possibly partial) JSON object of overrides and merge it over
    /// the defaults.
    pub fn from_json_overrides(json: &str) -> crate::error::Result<Self> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyOutputPath);
        }

        for (field, value) in [
            ("maxConceptsToShow", self.max_concepts_to_show),
            ("maxHubsToShow", self.max_hubs_to_show),
            ("maxOrphansToShow", self.max_orphans_to_show),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::InvalidLimit {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid limit for '{field}': {value} (must be at least 1)")]
    InvalidLimit { field: String, value: usize },

    #[error("Output path must not be empty")]
    EmptyOutputPath,
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    output_path: Option<PathBuf>,
    include_table_of_contents: Option<bool>,
    include_mermaid_diagrams: Option<bool>,
    max_concepts_to_show: Option<usize>,
    max_hubs_to_show: Option<usize>,
    max_orphans_to_show: Option<usize>,
}

impl ReportConfigBuilder {
    /// Set the output file path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Enable or disable the table of contents.
    pub fn include_table_of_contents(mut self, include: bool) -> Self {
        self.include_table_of_contents = Some(include);
        self
    }

    /// Enable or disable Mermaid diagrams.
    pub fn include_mermaid_diagrams(mut self, include: bool) -> Self {
        self.include_mermaid_diagrams = Some(include);
        self
    }

    /// Set how many concepts the top-concepts table shows.
    pub fn max_concepts_to_show(mut self, max: usize) -> Self {
        self.max_concepts_to_show = Some(max);
        self
    }

    pub fn max_hubs_to_show(mut self, max: usize) -> Self {
        self.max_hubs_to_show = Some(max);
        self
    }

    pub fn max_orphans_to_show(mut self, max: usize) -> Self {
        self.max_orphans_to_show = Some(max);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let defaults = ReportConfig::default();
        let config = ReportConfig {
            output_path: self.output_path.unwrap_or(defaults.output_path),
            include_table_of_contents: self
                .include_table_of_contents
                .unwrap_or(defaults.include_table_of_contents),
            include_mermaid_diagrams: self
                .include_mermaid_diagrams
                .unwrap_or(defaults.include_mermaid_diagrams),
            max_concepts_to_show: self
                .max_concepts_to_show
                .unwrap_or(defaults.max_concepts_to_show),
            max_hubs_to_show: self.max_hubs_to_show.unwrap_or(defaults.max_hubs_to_show),
            max_orphans_to_show: self
                .max_orphans_to_show
                .unwrap_or(defaults.max_orphans_to_show),
        };

        config.validate()?;
        Ok(config)
    }
}
