//! Error types for report composition.
//!
//! Two tiers exist. [`ReportError`] is fatal: it rejects a whole
//! `generate()` call (bad input, bad config, file-system failure).
//! [`SectionError`] is local to one section: the orchestrator recovers it
//! by writing a warning block into the report and moving on.
//!
//! Fatal errors are serializable so the CLI can emit them as JSON.

use crate::config::ConfigValidationError;
use crate::formatters::MermaidError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// No analysis data was supplied at all.
    #[error("Analysis data is required")]
    MissingAnalysisData,

    /// The analysis data has no `documents` key.
    #[error("Analysis data must include documents")]
    MissingDocuments,

    /// The analysis data has no `concepts` key.
    #[error("Analysis data must include concepts")]
    MissingConcepts,

    /// The analysis data is present but not shaped like an analysis object.
    #[error("Invalid analysis data: {0}")]
    InvalidAnalysisData(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReportError>,
    },
}

impl ReportError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAnalysisData => "MISSING_ANALYSIS_DATA",
            Self::MissingDocuments => "MISSING_DOCUMENTS",
            Self::MissingConcepts => "MISSING_CONCEPTS",
            Self::InvalidAnalysisData(_) => "INVALID_ANALYSIS_DATA",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was raised before any content was produced
    /// because the input or configuration was rejected.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Self::MissingAnalysisData
            | Self::MissingDocuments
            | Self::MissingConcepts
            | Self::InvalidAnalysisData(_)
            | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_validation_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ReportError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ReportError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportError::Io(e).with_context(context))
    }
}

/// Failure raised by a single section while it renders.
///
/// The `Display` output is what ends up in the report's warning block.
#[derive(Error, Debug)]
pub enum SectionError {
    /// Section-specific failure with a human-readable message.
    #[error("{0}")]
    Failed(String),

    /// A diagram could not be rendered.
    #[error(transparent)]
    Diagram(#[from] MermaidError),

    /// Any other error surfaced by a section implementation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SectionError {
    pub fn failed(message: impl Into<String>) -> Self {
        SectionError::Failed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ReportError::MissingAnalysisData.error_code(),
            "MISSING_ANALYSIS_DATA"
        );
        assert_eq!(ReportError::MissingDocuments.error_code(), "MISSING_DOCUMENTS");
        assert_eq!(ReportError::MissingConcepts.error_code(), "MISSING_CONCEPTS");
    }

    #[test]
    fn test_is_validation_error() {
        assert!(ReportError::MissingDocuments.is_validation_error());
        assert!(
            ReportError::MissingConcepts
                .with_context("validating input")
                .is_validation_error()
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!ReportError::Io(io).is_validation_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = ReportError::InvalidAnalysisData("expected an object".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("INVALID_ANALYSIS_DATA"));
        assert!(json.contains("expected an object"));
    }

    #[test]
    fn test_with_context() {
        let error = ReportError::MissingDocuments.with_context("Loading analysis");
        assert!(error.to_string().contains("Loading analysis"));
        assert_eq!(error.error_code(), "MISSING_DOCUMENTS");
    }

    #[test]
    fn test_io_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let error = result.context("Writing report").unwrap_err();
        assert_eq!(error.error_code(), "IO_ERROR");
        assert!(error.to_string().starts_with("Writing report"));
    }

    #[test]
    fn test_section_error_display() {
        let error = SectionError::failed("boom");
        assert_eq!(error.to_string(), "boom");

        let error: SectionError = anyhow::anyhow!("unexpected input").into();
        assert_eq!(error.to_string(), "unexpected input");

        let error: SectionError = MermaidError::MissingType.into();
        assert_eq!(error.to_string(), MermaidError::MissingType.to_string());
    }
}
