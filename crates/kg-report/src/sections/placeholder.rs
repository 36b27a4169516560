//! Sections that reserve their place in the report and table of contents
//! until their analysis is written.

use super::{Section, SectionFuture};
use crate::config::ReportConfig;
use crate::reporting::ReportBuilder;
use crate::types::AnalysisData;

pub const PLACEHOLDER_TEXT: &str = "This section will be implemented in a future phase.";

/// A heading followed by a fixed "future phase" paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderSection {
    title: &'static str,
}

impl PlaceholderSection {
    pub const fn new(title: &'static str) -> Self {
        Self { title }
    }

    pub const fn hub_documents() -> Self {
        Self::new("Hub Documents")
    }

    pub const fn orphaned_content() -> Self {
        Self::new("Orphaned Content")
    }

    pub const fn quality_assessment() -> Self {
        Self::new("Quality Assessment")
    }

    pub const fn structure_breakdown() -> Self {
        Self::new("Structure Breakdown")
    }

    pub const fn recommendations() -> Self {
        Self::new("Recommendations")
    }
}

impl Section for PlaceholderSection {
    fn title(&self) -> &str {
        self.title
    }

    fn generate<'a>(
        &'a self,
        _data: &'a AnalysisData,
        _config: &'a ReportConfig,
        builder: &'a mut ReportBuilder,
    ) -> SectionFuture<'a> {
        Box::pin(async move {
            builder.add_heading(self.title).add_paragraph(PLACEHOLDER_TEXT);
            Ok(())
        })
    }
}
