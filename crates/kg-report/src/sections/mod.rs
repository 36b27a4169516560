//! Report sections.
//!
//! A [`Section`] is one pluggable part of the report. The generator drives
//! every registered section in order, handing each the analysis data, the
//! current configuration and a builder to append to.
//!
//! # Implementing a Section
//!
//! ```rust,ignore
//! use kg_report::sections::{Section, SectionFuture};
//!
//! struct GlossarySection;
//!
//! impl Section for GlossarySection {
//!     fn title(&self) -> &str {
//!         "Glossary"
//!     }
//!
//!     fn generate<'a>(
//!         &'a self,
//!         data: &'a AnalysisData,
//!         _config: &'a ReportConfig,
//!         builder: &'a mut ReportBuilder,
//!     ) -> SectionFuture<'a> {
//!         Box::pin(async move {
//!             builder.add_heading(self.title());
//!             builder.add_paragraph(&format!("{} documents", data.document_count()));
//!             Ok(())
//!         })
//!     }
//! }
//! ```
//!
//! Sections should treat missing optional input as empty. Returning an
//! error is reserved for genuinely unexpected failures; the generator turns
//! it into a warning block in the report.

mod executive_summary;
mod placeholder;
mod top_concepts;
mod visualization;

pub use executive_summary::{EXECUTIVE_SUMMARY_TITLE, ExecutiveSummarySection};
pub use placeholder::{PLACEHOLDER_TEXT, PlaceholderSection};
pub use top_concepts::{
    CATEGORY_BREAKDOWN_THRESHOLD, PIE_CHART_LIMIT, TOP_CONCEPTS_TITLE, TopConceptsSection,
};
pub use visualization::{SERVE_COMMAND, VISUALIZATION_TITLE, write_visualization_section};

use crate::config::ReportConfig;
use crate::error::SectionError;
use crate::reporting::ReportBuilder;
use crate::types::AnalysisData;
use std::future::Future;
use std::pin::Pin;

/// Future returned by [`Section::generate`].
pub type SectionFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SectionError>> + Send + 'a>>;

/// A named unit of report content.
///
/// Sections hold no report content themselves; everything they produce goes
/// into the builder they are given.
pub trait Section: Send + Sync {
    /// Heading text, also used for the table of contents.
    fn title(&self) -> &str;

    /// Append this section's content to `builder`.
    fn generate<'a>(
        &'a self,
        data: &'a AnalysisData,
        config: &'a ReportConfig,
        builder: &'a mut ReportBuilder,
    ) -> SectionFuture<'a>;
}

/// The built-in sections in report order.
pub fn default_sections() -> Vec<Box<dyn Section>> {
    vec![
        Box::new(ExecutiveSummarySection),
        Box::new(TopConceptsSection),
        Box::new(PlaceholderSection::hub_documents()),
        Box::new(PlaceholderSection::orphaned_content()),
        Box::new(PlaceholderSection::quality_assessment()),
        Box::new(PlaceholderSection::structure_breakdown()),
        Box::new(PlaceholderSection::recommendations()),
    ]
}
