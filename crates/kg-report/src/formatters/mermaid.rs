//! Mermaid diagram rendering.
//!
//! Three diagram kinds are supported:
//!
//! - `pie`: an array of `{label, value}` slices
//! - `flowchart`: `{nodes: [{id, label}], edges: [{source, target}]}`
//! - `graph`: an array of `{source, target, sourceLabel, targetLabel}` edges
//!
//! Fields may be strings or numbers. Individual entries missing a required
//! field are skipped. Only a missing or wrongly shaped top-level container
//! is an error.

use crate::utils::{field_text, is_truthy};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const INDENT: &str = "    ";

/// Supported Mermaid diagram kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramType {
    Pie,
    Flowchart,
    Graph,
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagramType::Pie => "pie",
            DiagramType::Flowchart => "flowchart",
            DiagramType::Graph => "graph",
        };
        f.write_str(name)
    }
}

impl FromStr for DiagramType {
    type Err = MermaidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(MermaidError::MissingType),
            "pie" => Ok(DiagramType::Pie),
            "flowchart" => Ok(DiagramType::Flowchart),
            "graph" => Ok(DiagramType::Graph),
            other => Err(MermaidError::UnsupportedDiagramType(other.to_string())),
        }
    }
}

/// Errors raised while rendering a diagram.
#[derive(Error, Debug)]
pub enum MermaidError {
    #[error("Diagram type is required")]
    MissingType,

    #[error("Unsupported diagram type: {0}")]
    UnsupportedDiagramType(String),

    #[error("Data is required for {0} diagram")]
    DataRequired(DiagramType),

    #[error("Invalid data for {diagram} diagram: expected {expected}")]
    InvalidData {
        diagram: DiagramType,
        expected: &'static str,
    },
}

/// Renders Mermaid diagram source (without the surrounding code fence).
pub struct MermaidFormatter;

impl MermaidFormatter {
    /// Render a diagram given its type name.
    pub fn format(diagram_type: &str, data: &Value) -> Result<String, MermaidError> {
        let diagram_type: DiagramType = diagram_type.parse()?;
        Self::render(diagram_type, data)
    }

    /// Render a diagram of a known type.
    pub fn render(diagram_type: DiagramType, data: &Value) -> Result<String, MermaidError> {
        if !is_truthy(data) {
            return Err(MermaidError::DataRequired(diagram_type));
        }

        match diagram_type {
            DiagramType::Pie => Self::pie(data),
            DiagramType::Flowchart => Self::flowchart(data),
            DiagramType::Graph => Self::graph(data),
        }
    }

    /// Pie chart of `{label, value}` slices.
    pub fn pie(data: &Value) -> Result<String, MermaidError> {
        let slices = data.as_array().ok_or(MermaidError::InvalidData {
            diagram: DiagramType::Pie,
            expected: "an array of {label, value}",
        })?;

        let mut lines = vec!["pie title Concept Distribution".to_string()];
        for slice in slices {
            let (Some(label), Some(value)) = (field_text(slice, "label"), field_text(slice, "value"))
            else {
                continue;
            };
            lines.push(format!("{INDENT}\"{}\" : {}", label, value));
        }

        Ok(lines.join("\n"))
    }

    /// Top-down flowchart. Nodes are declared first, then edges; nodes with
    /// no edges still appear.
    pub fn flowchart(data: &Value) -> Result<String, MermaidError> {
        if !data.is_object() {
            return Err(MermaidError::InvalidData {
                diagram: DiagramType::Flowchart,
                expected: "an object with nodes and edges",
            });
        }

        let mut lines = vec!["flowchart TD".to_string()];

        for node in Self::entries(data, "nodes") {
            if let (Some(id), Some(label)) = (field_text(node, "id"), field_text(node, "label")) {
                lines.push(format!("{INDENT}{}[{}]", id, label));
            }
        }

        for edge in Self::entries(data, "edges") {
            if let (Some(source), Some(target)) =
                (field_text(edge, "source"), field_text(edge, "target"))
            {
                lines.push(format!("{INDENT}{} --> {}", source, target));
            }
        }

        Ok(lines.join("\n"))
    }

    /// Left-to-right graph of labelled edges.
    pub fn graph(data: &Value) -> Result<String, MermaidError> {
        let edges = data.as_array().ok_or(MermaidError::InvalidData {
            diagram: DiagramType::Graph,
            expected: "an array of {source, target, sourceLabel, targetLabel}",
        })?;

        let mut lines = vec!["graph LR".to_string()];
        for edge in edges {
            let (Some(source), Some(target), Some(source_label), Some(target_label)) = (
                field_text(edge, "source"),
                field_text(edge, "target"),
                field_text(edge, "sourceLabel"),
                field_text(edge, "targetLabel"),
            ) else {
                continue;
            };
            lines.push(format!(
                "{INDENT}{}[{}] --> {}[{}]",
                source, source_label, target, target_label
            ));
        }

        Ok(lines.join("\n"))
    }

    fn entries<'a>(data: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
        data.get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
    }
}
