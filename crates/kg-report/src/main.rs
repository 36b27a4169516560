//! CLI entry point for the knowledge-graph report composer.

use anyhow::{Result, anyhow};
use clap::Parser;
use kg_report::{AnalysisData, MarkdownReportGenerator, ReportConfig, ReportError, SectionOutcome};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Documentation Knowledge-Graph Report Composer",
    long_about = "Builds a Markdown analysis report from pre-computed documentation analysis JSON.\n\n\
                  EXAMPLES:\n  \
                  # Default output (dist/PHASE1_ANALYSIS_REPORT.md)\n  \
                  kg-report -i analysis.json\n\n  \
                  # Custom output without diagrams\n  \
                  kg-report -i analysis.json -o reports/phase1.md --no-mermaid\n\n  \
                  # Config overrides from a JSON file, result as JSON\n  \
                  kg-report -i analysis.json --config report.json --json"
)]
struct Args {
    /// Path to the analysis JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Output Markdown file (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with configuration overrides (camelCase keys)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Omit the table of contents
    #[arg(long)]
    no_toc: bool,

    /// Omit Mermaid diagrams
    #[arg(long)]
    no_mermaid: bool,

    /// Maximum number of concepts in the top-concepts table
    #[arg(long)]
    max_concepts: Option<usize>,

    /// Maximum number of hub documents listed
    #[arg(long)]
    max_hubs: Option<usize>,

    /// Maximum number of orphaned documents listed
    #[arg(long)]
    max_orphans: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Print the result as JSON to stdout and disable logging
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Resolve the configuration: defaults, then the overrides file, then flags.
fn build_config(args: &Args) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let overrides = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;
            ReportConfig::from_json_overrides(&overrides)?
        }
        None => ReportConfig::default(),
    };

    if let Some(ref output) = args.output {
        config.output_path = output.clone();
    }
    if args.no_toc {
        config.include_table_of_contents = false;
    }
    if args.no_mermaid {
        config.include_mermaid_diagrams = false;
    }
    if let Some(max) = args.max_concepts {
        config.max_concepts_to_show = max;
    }
    if let Some(max) = args.max_hubs {
        config.max_hubs_to_show = max;
    }
    if let Some(max) = args.max_orphans {
        config.max_orphans_to_show = max;
    }

    config.validate().map_err(ReportError::from)?;
    Ok(config)
}

fn load_analysis(path: &Path) -> Result<AnalysisData> {
    if !path.exists() {
        return Err(anyhow!("Input file not found: {}", path.display()));
    }

    info!("Loading analysis from: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(AnalysisData::from_json_str(&content)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    match run(&args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&json_error(&e))?);
            }
            error!("Report generation failed: {:#}", e);
            Err(e)
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let data = load_analysis(&args.input)?;

    let mut generator = MarkdownReportGenerator::new(config);
    let path = generator.generate(&data).await?;
    print_result(&generator, &path, args.json)
}

/// `{code, message}` for a failure, using the library error code when there
/// is one.
fn json_error(e: &anyhow::Error) -> Value {
    match e.downcast_ref::<ReportError>() {
        Some(report_error) => json!({
            "code": report_error.error_code(),
            "message": report_error.to_string(),
        }),
        None => json!({"code": "CLI_ERROR", "message": format!("{:#}", e)}),
    }
}

/// Print the written path and the outcome of each section.
///
/// Uses `println!` on purpose: this is the command's output, not logging.
fn print_result(generator: &MarkdownReportGenerator, path: &Path, json_output: bool) -> Result<()> {
    if json_output {
        let sections: Vec<_> = generator
            .section_outcomes()
            .iter()
            .map(|report| match &report.outcome {
                SectionOutcome::Success => json!({"title": report.title, "status": "ok"}),
                SectionOutcome::Failed(message) => {
                    json!({"title": report.title, "status": "failed", "error": message})
                }
            })
            .collect();

        let output = json!({
            "reportPath": path.display().to_string(),
            "sections": sections,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Report written to: {}", path.display());
    for report in generator.section_outcomes() {
        match &report.outcome {
            SectionOutcome::Success => println!("  ok      {}", report.title),
            SectionOutcome::Failed(message) => {
                println!("  FAILED  {} ({})", report.title, message)
            }
        }
    }

    Ok(())
}
