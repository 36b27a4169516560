//! Report composition.
//!
//! [`ReportBuilder`] accumulates Markdown blocks for one run;
//! [`MarkdownReportGenerator`] drives the registered sections against it
//! and writes the result to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use kg_report::reporting::{MarkdownReportGenerator, ReportBuilder};
//! use kg_report::ReportConfig;
//!
//! // Compose ad-hoc Markdown
//! let mut builder = ReportBuilder::new();
//! builder
//!     .add_title("Notes")
//!     .add_table_of_contents(&["Summary"])
//!     .add_heading("Summary")
//!     .add_paragraph("All good.");
//! println!("{}", builder.build());
//!
//! // Or generate the full analysis report
//! let mut generator = MarkdownReportGenerator::new(ReportConfig::default());
//! let path = generator.generate(&analysis).await?;
//! ```

mod builder;
mod generator;

pub use builder::{ReportBuilder, TABLE_OF_CONTENTS_TITLE, anchor_for};
pub use generator::{MarkdownReportGenerator, REPORT_TITLE, SectionOutcome, SectionReport};
