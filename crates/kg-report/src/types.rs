//! Input model: the pre-computed documentation analysis.
//!
//! Only `documents` and `concepts` are required. The `analysis`, `quality`
//! and `structure` substructures are optional and read leniently: a
//! malformed substructure is treated as absent rather than failing the
//! whole report. Concept entries are read one at a time, so a malformed
//! entry drops only itself.

use crate::error::{ReportError, Result};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Deserialize an optional field, mapping any shape mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Same as [`lenient`] for list fields, where a mismatch becomes empty.
fn lenient_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Deserialize a list entry by entry. Entries that don't fit `T` are
/// skipped; the rest are kept in order.
fn lenient_entries<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    let total = entries.len();
    let kept: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if kept.len() < total {
        warn!("Skipped {} malformed list entries", total - kept.len());
    }
    Ok(kept)
}

/// A non-negative integer, also accepting whole-number floats such as `30.0`.
fn whole_number(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// A required count. `null` reads as 0; fractional or negative numbers are
/// rejected.
fn whole_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0);
    }
    whole_number(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a whole number, found {}", value)))
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(whole_number(&value))
}

// ============================================================================
// Analysis Data
// ============================================================================

/// Output of the upstream analysis pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    /// Parsed source documents. Opaque to the report beyond their count.
    #[serde(default)]
    pub documents: Option<Vec<Value>>,
    /// Extracted concepts.
    #[serde(default)]
    pub concepts: Option<ConceptSummary>,
    /// Graph metrics.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub analysis: Option<GraphAnalysis>,
    /// Quality scores.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityScores>,
    /// Structural findings.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureFindings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSummary {
    /// Concepts ordered by descending frequency.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub top_concepts: Vec<Concept>,
}

/// A concept extracted from the documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub frequency: f64,
    #[serde(default, deserialize_with = "whole_count")]
    pub file_count: u64,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub concept_type: Option<ConceptType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Concept {
    pub fn new(concept: impl Into<String>, frequency: f64, file_count: u64) -> Self {
        Self {
            concept: concept.into(),
            frequency,
            file_count,
            concept_type: None,
            category: None,
        }
    }

    pub fn with_type(mut self, concept_type: ConceptType) -> Self {
        self.concept_type = Some(concept_type);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptType {
    Domain,
    Technical,
    General,
}

impl fmt::Display for ConceptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConceptType::Domain => "domain",
            ConceptType::Technical => "technical",
            ConceptType::General => "general",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnalysis {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicGraphMetrics>,
}

/// Whole-graph statistics computed upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicGraphMetrics {
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub total_nodes: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub total_edges: Option<u64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub avg_degree: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub is_connected: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScores {
    /// Overall documentation quality, 0 - 100.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureFindings {
    /// Documents with no links to or from other documents.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub orphan_documents: Vec<Value>,
}

impl AnalysisData {
    /// Build analysis data from a JSON value.
    ///
    /// `null` is reported as missing data; anything other than an object is
    /// rejected as invalid.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Err(ReportError::MissingAnalysisData),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|e| ReportError::InvalidAnalysisData(e.to_string())),
            other => Err(ReportError::InvalidAnalysisData(format!(
                "expected an object, found {}",
                json_kind(other)
            ))),
        }
    }

    /// Parse analysis data from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Check the two required top-level keys. No deeper validation is done.
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_none() {
            return Err(ReportError::MissingDocuments);
        }
        if self.concepts.is_none() {
            return Err(ReportError::MissingConcepts);
        }
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.documents.as_ref().map_or(0, Vec::len)
    }

    pub fn top_concepts(&self) -> &[Concept] {
        self.concepts
            .as_ref()
            .map_or(&[], |c| c.top_concepts.as_slice())
    }

    pub fn concept_count(&self) -> usize {
        self.top_concepts().len()
    }

    fn basic(&self) -> Option<&BasicGraphMetrics> {
        self.analysis.as_ref().and_then(|a| a.basic.as_ref())
    }

    pub fn total_nodes(&self) -> u64 {
        self.basic().and_then(|b| b.total_nodes).unwrap_or(0)
    }

    pub fn total_edges(&self) -> u64 {
        self.basic().and_then(|b| b.total_edges).unwrap_or(0)
    }

    pub fn density(&self) -> f64 {
        self.basic().and_then(|b| b.density).unwrap_or(0.0)
    }

    pub fn avg_degree(&self) -> f64 {
        self.basic().and_then(|b| b.avg_degree).unwrap_or(0.0)
    }

    /// `None` when connectivity was not computed upstream.
    pub fn is_connected(&self) -> Option<bool> {
        self.basic().and_then(|b| b.is_connected)
    }

    pub fn orphan_count(&self) -> usize {
        self.structure
            .as_ref()
            .map_or(0, |s| s.orphan_documents.len())
    }

    /// The overall quality score, if there is one worth reporting.
    ///
    /// A score of exactly 0 is indistinguishable from "not computed"
    /// upstream and is reported as absent.
    pub fn reportable_quality_score(&self) -> Option<f64> {
        self.quality
            .as_ref()
            .and_then(|q| q.overall_score)
            .filter(|score| *score != 0.0 && !score.is_nan())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
