//! Style Validator CLI
//!
//! Validates style documents against a style spec and prints diagnostics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use style_spec_validator::config::OutputFormat;
use style_spec_validator::{Diagnostics, Document, StyleSpec, Validator, ValidatorConfig};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "style-validate")]
#[command(about = "Validate style documents against a style spec")]
struct Cli {
    /// Style documents, or directories to search for them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Style spec JSON (overrides the configured path)
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Extra config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Report at most this many diagnostics per document (0 = all)
    #[arg(long)]
    max_diagnostics: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Pretty,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Pretty => OutputFormat::Pretty,
        }
    }
}

#[derive(Serialize)]
struct FileReport {
    path: String,
    diagnostics: Diagnostics,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether every document was valid
fn run(cli: Cli) -> Result<bool> {
    let config = ValidatorConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    let spec_path = cli
        .spec
        .or_else(|| config.spec.path.clone())
        .context("no style spec given; pass --spec or set [spec] path in the config")?;
    let spec = StyleSpec::from_path(&spec_path)
        .with_context(|| format!("loading style spec {}", spec_path.display()))?;
    let validator = Validator::with_builtins(spec)?;
    tracing::info!(spec = %spec_path.display(), version = validator.spec().version(), "style spec loaded");

    let format = cli.format.map(OutputFormat::from).unwrap_or(config.output.format);
    let max_diagnostics = cli.max_diagnostics.unwrap_or(config.validation.max_diagnostics);

    let mut reports = Vec::new();
    for path in collect_documents(&cli.inputs, &config) {
        let document = Document::from_path(&path)
            .with_context(|| format!("loading document {}", path.display()))?;
        let mut diagnostics = validator.validate_style(&document)?;
        if max_diagnostics > 0 {
            diagnostics.truncate(max_diagnostics);
        }
        tracing::debug!(path = %path.display(), diagnostics = diagnostics.len(), "validated document");
        reports.push(FileReport {
            path: path.display().to_string(),
            diagnostics,
        });
    }

    let all_valid = reports.iter().all(|r| r.diagnostics.is_empty());

    match format {
        OutputFormat::Text => {
            for report in &reports {
                if report.diagnostics.is_empty() {
                    println!("✅ {} - valid", report.path);
                } else {
                    println!("❌ {} - {} error(s)", report.path, report.diagnostics.len());
                    for diagnostic in &report.diagnostics {
                        println!("   └─ {}", diagnostic);
                    }
                }
            }
        }
        OutputFormat::Json | OutputFormat::Pretty => {
            let report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "spec": spec_path.display().to_string(),
                "spec_version": validator.spec().version(),
                "valid": all_valid,
                "files": reports,
            });
            let rendered = if format == OutputFormat::Pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", rendered);
        }
    }

    Ok(all_valid)
}

/// Expand directories into the documents they contain, sorted by name
fn collect_documents(inputs: &[PathBuf], config: &ValidatorConfig) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for input in inputs {
        if input.is_dir() {
            documents.extend(
                WalkDir::new(input)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file() && config.accepts(entry.path()))
                    .map(|entry| entry.into_path()),
            );
        } else {
            documents.push(input.clone());
        }
    }
    documents
}
