//! Documentation Knowledge-Graph Report Composer
//!
//! Turns pre-computed documentation analysis (document counts, extracted
//! concepts, graph metrics, quality scores, structural findings) into a
//! long-form Markdown report.
//!
//! # Overview
//!
//! - **Report builder**: an append-only sequence of Markdown blocks with
//!   headings, lists, tables, code blocks, Mermaid diagrams, metadata
//!   comments and a table of contents
//! - **Formatters**: GitHub-flavored tables and Mermaid `pie`, `flowchart`
//!   and `graph` diagrams
//! - **Sections**: pluggable report parts driven in a fixed order
//! - **Failure isolation**: a failing section becomes a warning block; the
//!   rest of the report still renders
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kg_report::{AnalysisData, MarkdownReportGenerator, ReportConfig};
//!
//! let data = AnalysisData::from_json_str(&std::fs::read_to_string("analysis.json")?)?;
//!
//! let config = ReportConfig::builder()
//!     .output_path("dist/report.md")
//!     .max_concepts_to_show(25)
//!     .build()?;
//!
//! let mut generator = MarkdownReportGenerator::new(config);
//! let path = generator.generate(&data).await?;
//! println!("Report written to {}", path.display());
//! ```
//!
//! # Custom Sections
//!
//! Implement [`sections::Section`] and register it with
//! [`MarkdownReportGenerator::register_section`]. See the [`sections`]
//! module documentation.

pub mod config;
pub mod error;
pub mod formatters;
pub mod reporting;
pub mod sections;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result as ReportResult, ResultExt, SectionError};
pub use formatters::{Alignment, DiagramType, MermaidError, MermaidFormatter, TableFormatter};
pub use reporting::{
    MarkdownReportGenerator, REPORT_TITLE, ReportBuilder, SectionOutcome, SectionReport, anchor_for,
};
pub use sections::{Section, SectionFuture, default_sections};
pub use types::{AnalysisData, Concept, ConceptSummary, ConceptType};
