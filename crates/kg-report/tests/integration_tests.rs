//! Integration tests for report generation.
//!
//! These tests drive the generator end to end and inspect the written file.

use kg_report::{
    AnalysisData, MarkdownReportGenerator, REPORT_TITLE, ReportBuilder, ReportConfig, ReportError,
    Section, SectionError, SectionFuture, SectionOutcome, anchor_for,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::tempdir;

// ============================================================================
// Helper Functions
// ============================================================================

/// 20 documents, 50 concepts led by "Rollup", a connected graph and a
/// quality score of 82.
fn sample_analysis() -> Value {
    let mut concepts = vec![json!({
        "concept": "Rollup",
        "frequency": 42,
        "fileCount": 10,
        "category": "arbitrum",
        "type": "domain"
    })];
    for i in 1..50 {
        concepts.push(json!({
            "concept": format!("Concept{}", i),
            "frequency": 41 - (i % 40),
            "fileCount": 1 + i % 7,
            "category": if i % 3 == 0 { "tooling" } else { "arbitrum" },
            "type": "technical"
        }));
    }

    let documents: Vec<Value> = (0..20)
        .map(|i| json!({"path": format!("docs/page{}.md", i)}))
        .collect();

    json!({
        "documents": documents,
        "concepts": {"topConcepts": concepts},
        "analysis": {"basic": {
            "totalNodes": 30,
            "totalEdges": 45,
            "density": 0.1,
            "avgDegree": 3,
            "isConnected": true
        }},
        "quality": {"overallScore": 82},
        "structure": {"orphanDocuments": []}
    })
}

fn sample_data() -> AnalysisData {
    AnalysisData::from_value(&sample_analysis()).expect("sample analysis is valid")
}

fn config_for(path: &Path) -> ReportConfig {
    ReportConfig::builder()
        .output_path(path)
        .build()
        .expect("valid config")
}

async fn generate_to(path: &Path, config: ReportConfig) -> String {
    let mut generator = MarkdownReportGenerator::new(ReportConfig {
        output_path: path.to_path_buf(),
        ..config
    });
    let written = generator.generate(&sample_data()).await.unwrap();
    std::fs::read_to_string(written).unwrap()
}

struct ExplodingSection;

impl Section for ExplodingSection {
    fn title(&self) -> &str {
        "Exploding Section"
    }

    fn generate<'a>(
        &'a self,
        _data: &'a AnalysisData,
        _config: &'a ReportConfig,
        builder: &'a mut ReportBuilder,
    ) -> SectionFuture<'a> {
        Box::pin(async move {
            builder.add_heading(self.title()).add_paragraph("half-written");
            Err(SectionError::failed("graph metrics unavailable"))
        })
    }
}

struct NoteSection(&'static str);

impl Section for NoteSection {
    fn title(&self) -> &str {
        self.0
    }

    fn generate<'a>(
        &'a self,
        data: &'a AnalysisData,
        _config: &'a ReportConfig,
        builder: &'a mut ReportBuilder,
    ) -> SectionFuture<'a> {
        Box::pin(async move {
            builder
                .add_heading(self.0)
                .add_paragraph(&format!("{} documents seen", data.document_count()));
            Ok(())
        })
    }
}

// ============================================================================
// Full Report Tests
// ============================================================================

#[tokio::test]
async fn test_full_report_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");

    let report = generate_to(&path, ReportConfig::default()).await;

    assert!(report.starts_with(&format!("# {}\n", REPORT_TITLE)));
    assert!(report.contains("documentsAnalyzed: 20"));
    assert!(report.contains("conceptsExtracted: 50"));
    assert!(
        report.contains("**Rollup** is the most mentioned concept with 42 occurrences across 10 files")
    );
    assert!(report.contains("The documentation forms a fully connected knowledge graph"));
    assert!(report.contains("Overall quality score: 82/100"));
    assert!(!report.contains("orphaned documents have no links"));
    assert!(report.contains("| Rank | Concept | Frequency | Files | Category | Type |"));
    assert!(report.contains("| 1 | Rollup | 42.0 | 10 | arbitrum | domain |"));
    assert!(report.contains("### Concept Categories"));
    assert!(report.contains("```mermaid\npie title Concept Distribution"));
    assert!(report.contains("npm run serve"));
}

#[tokio::test]
async fn test_section_order() {
    let dir = tempdir().unwrap();
    let report = generate_to(&dir.path().join("report.md"), ReportConfig::default()).await;

    let headings: Vec<&str> = report
        .lines()
        .filter(|line| line.starts_with("## "))
        .collect();

    assert_eq!(
        headings,
        vec![
            "## Table of Contents",
            "## Executive Summary",
            "## Top Concepts",
            "## Hub Documents",
            "## Orphaned Content",
            "## Quality Assessment",
            "## Structure Breakdown",
            "## Recommendations",
            "## Interactive Visualization",
        ]
    );
}

#[tokio::test]
async fn test_toc_anchors_match_headings() {
    let dir = tempdir().unwrap();
    let report = generate_to(&dir.path().join("report.md"), ReportConfig::default()).await;

    let entries: Vec<(&str, &str)> = report
        .lines()
        .filter_map(|line| {
            let rest = line.split_once(". [")?.1;
            let (title, anchor) = rest.split_once("](#")?;
            Some((title, anchor.strip_suffix(')')?))
        })
        .collect();

    assert_eq!(entries.len(), 8);
    for (title, anchor) in entries {
        assert_eq!(anchor, anchor_for(title));
        assert!(
            report.contains(&format!("\n## {}\n", title)),
            "missing heading for TOC entry {}",
            title
        );
    }
}

#[tokio::test]
async fn test_max_concepts_limits_table() {
    let dir = tempdir().unwrap();
    let config = ReportConfig {
        max_concepts_to_show: 5,
        ..Default::default()
    };

    let report = generate_to(&dir.path().join("report.md"), config).await;

    assert!(report.contains("top 5"));
    assert!(report.contains("| 5 | Concept4 |"));
    assert!(!report.contains("| 6 | Concept5 |"));
    assert!(!report.contains("### Concept Categories"));
}

#[tokio::test]
async fn test_mermaid_disabled() {
    let dir = tempdir().unwrap();
    let config = ReportConfig {
        include_mermaid_diagrams: false,
        ..Default::default()
    };

    let report = generate_to(&dir.path().join("report.md"), config).await;
    assert!(!report.contains("```mermaid"));
    assert!(report.contains("## Top Concepts"));
}

#[tokio::test]
async fn test_toc_disabled() {
    let dir = tempdir().unwrap();
    let config = ReportConfig {
        include_table_of_contents: false,
        ..Default::default()
    };

    let report = generate_to(&dir.path().join("report.md"), config).await;
    assert!(!report.contains("## Table of Contents"));
    assert!(!report.contains("](#executive-summary)"));
}

// ============================================================================
// File Output Tests
// ============================================================================

#[tokio::test]
async fn test_creates_nested_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dist").join("reports").join("phase1.md");

    let mut generator = MarkdownReportGenerator::new(config_for(&path));
    let written = generator.generate(&sample_data()).await.unwrap();

    assert!(written.is_absolute());
    assert!(written.exists());
    assert!(std::fs::metadata(&written).unwrap().len() > 0);
}

#[tokio::test]
async fn test_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");
    std::fs::write(&path, "stale content").unwrap();

    let mut generator = MarkdownReportGenerator::new(config_for(&path));
    generator.generate(&sample_data()).await.unwrap();

    let report = std::fs::read_to_string(&path).unwrap();
    assert!(!report.contains("stale content"));
    assert!(report.starts_with("# "));
}

#[tokio::test]
async fn test_generate_from_raw_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");

    let mut generator = MarkdownReportGenerator::new(config_for(&path));
    let written = generator
        .generate_from_value(&sample_analysis())
        .await
        .unwrap();

    assert_eq!(written, std::path::absolute(&path).unwrap());
}

#[tokio::test]
async fn test_generator_reuse_produces_fresh_reports() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");
    let mut generator = MarkdownReportGenerator::new(config_for(&path));

    generator.generate(&sample_data()).await.unwrap();
    generator.config_mut().include_mermaid_diagrams = false;
    generator.generate(&sample_data()).await.unwrap();

    let report = std::fs::read_to_string(&path).unwrap();
    assert_eq!(report.matches("## Executive Summary").count(), 1);
    assert!(!report.contains("```mermaid"));
}

// ============================================================================
// Failure Handling Tests
// ============================================================================

#[tokio::test]
async fn test_failing_section_does_not_abort_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");

    let mut generator = MarkdownReportGenerator::new(config_for(&path));
    generator
        .register_section(Box::new(NoteSection("Intro")))
        .register_section(Box::new(ExplodingSection))
        .register_section(Box::new(NoteSection("Outro")));

    generator.generate(&sample_data()).await.unwrap();
    let report = std::fs::read_to_string(&path).unwrap();

    assert!(report.contains("## Intro\n"));
    assert!(report.contains("## Outro\n"));
    assert!(report.contains(
        "> **Warning**: Failed to generate section \"Exploding Section\": graph metrics unavailable"
    ));
    assert!(!report.contains("half-written"));
    assert!(!report.contains("## Executive Summary"));
    assert!(report.contains("## Interactive Visualization"));

    let outcomes = generator.section_outcomes();
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[1].outcome, SectionOutcome::Failed(_)));
}

#[tokio::test]
async fn test_missing_input_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");
    let mut generator = MarkdownReportGenerator::new(config_for(&path));

    let err = generator.generate_from_value(&Value::Null).await.unwrap_err();
    assert!(matches!(err, ReportError::MissingAnalysisData));

    let err = generator
        .generate_from_value(&json!({"concepts": {"topConcepts": []}}))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingDocuments));

    let err = generator
        .generate_from_value(&json!({"documents": []}))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingConcepts));
    assert!(err.is_validation_error());

    assert!(!path.exists());
}

#[tokio::test]
async fn test_malformed_concept_entry_keeps_the_rest() {
    let mut analysis = sample_analysis();
    analysis["concepts"]["topConcepts"][1]["concept"] = Value::Null;
    analysis["concepts"]["topConcepts"][2]["fileCount"] = json!(3.0);
    analysis["analysis"]["basic"]["totalNodes"] = json!(30.0);

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.md");
    let mut generator = MarkdownReportGenerator::new(config_for(&path));
    generator.generate_from_value(&analysis).await.unwrap();

    let report = std::fs::read_to_string(&path).unwrap();
    assert!(report.contains("conceptsExtracted: 49"));
    assert!(report.contains("graphNodes: 30"));
    assert!(report.contains("**49 unique concepts**"));
    assert!(
        report.contains("**Rollup** is the most mentioned concept with 42 occurrences across 10 files")
    );
    assert!(report.contains("| 2 | Concept2 |"));
}

#[tokio::test]
async fn test_unwritable_output_path_is_io_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut generator = MarkdownReportGenerator::new(config_for(&blocker.join("report.md")));
    let err = generator.generate(&sample_data()).await.unwrap_err();

    assert_eq!(err.error_code(), "IO_ERROR");
}
