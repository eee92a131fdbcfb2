//! Command-line surface: batch digitization, text extraction, quality audit.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lexiscan::annotation::{
    aggregate_stats, audit, extract_text, extract_text_with, normalize, StatsError, TextSource,
};
use lexiscan::batch::run_batch;
use lexiscan::config;
use lexiscan::ocr::VisionClient;

#[derive(Parser)]
#[command(name = config::APP_NAME, version, about = "Dictionary page digitization via cloud OCR")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconstruct plain text from one stored annotation file.
    Extract {
        /// Path to an annotation JSON produced by `run`.
        file: PathBuf,
        /// Trust the provider's flattened text field over the layout walk.
        #[arg(long)]
        prefer_flattened: bool,
    },
    /// Audit every stored annotation and print a quality report per file.
    Validate,
    /// OCR every page image in the input directory and persist annotations.
    Run {
        /// Directory of scanned page images.
        #[arg(long, default_value = config::INPUT_DIR)]
        input: PathBuf,
        /// Directory receiving one annotation JSON per image.
        #[arg(long, default_value = config::OUTPUT_DIR)]
        output: PathBuf,
        /// Language hints forwarded to the OCR provider (repeatable).
        #[arg(long = "lang")]
        languages: Vec<String>,
    },
}

fn main() {
    init_tracing();
    tracing::debug!(version = config::APP_VERSION, "starting");
    if let Err(error) = run() {
        eprintln!("Error: {error:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Extract {
            file,
            prefer_flattened,
        } => extract(&file, prefer_flattened),
        Command::Validate => validate(Path::new(config::OUTPUT_DIR)),
        Command::Run {
            input,
            output,
            languages,
        } => digitize(&input, &output, languages),
    }
}

/// Logs go to stderr so `extract` stdout stays machine-consumable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn extract(file: &Path, prefer_flattened: bool) -> anyhow::Result<()> {
    let raw = read_json(file)?;
    let document =
        normalize(raw).with_context(|| format!("cannot normalize {}", file.display()))?;

    let source = if prefer_flattened {
        TextSource::FlattenedFirst
    } else {
        TextSource::LayoutFirst
    };

    let text = extract_text_with(&document, source);
    // Exactly one trailing newline on non-empty output, none otherwise.
    let text = text.trim_end_matches('\n');
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

fn validate(output_dir: &Path) -> anyhow::Result<()> {
    let mut files = match annotation_files(output_dir) {
        Some(files) => files,
        None => {
            eprintln!(
                "Warning: no annotation directory at {}, run `{} run` first",
                output_dir.display(),
                config::APP_NAME
            );
            return Ok(());
        }
    };

    if files.is_empty() {
        eprintln!(
            "Warning: no annotations in {}, run `{} run` first",
            output_dir.display(),
            config::APP_NAME
        );
        return Ok(());
    }
    files.sort();

    for file in &files {
        println!("{}", file.display());
        audit_one(file);
        println!();
    }
    Ok(())
}

fn annotation_files(dir: &Path) -> Option<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).ok()?;
    Some(
        entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect(),
    )
}

/// Audit a single stored annotation. Failures render as "could not
/// measure" lines; they never abort the remaining files.
fn audit_one(file: &Path) {
    let document = match read_json(file).and_then(|raw| {
        normalize(raw).with_context(|| format!("cannot normalize {}", file.display()))
    }) {
        Ok(document) => document,
        Err(e) => {
            println!("  could not measure: {e:#}");
            return;
        }
    };

    let text = extract_text(&document);
    match aggregate_stats(&document) {
        Ok(stats) => {
            let report = audit(&stats, (!text.is_empty()).then_some(text.as_str()));
            println!("{report}");
        }
        Err(StatsError::NoWords { block_count }) => {
            println!("  blocks:          {block_count}");
            println!("  could not measure: annotation contains no words");
        }
        Err(e) => {
            println!("  could not measure: {e}");
        }
    }
}

fn digitize(input: &Path, output: &Path, languages: Vec<String>) -> anyhow::Result<()> {
    let languages = if languages.is_empty() {
        config::DEFAULT_LANGUAGE_HINTS
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        languages
    };

    // One client per run, borrowed by the batch loop, dropped on every
    // exit path when this function returns.
    let client = VisionClient::from_env().context("cannot construct OCR client")?;
    let summary = run_batch(&client, input, output, &languages)?;

    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed(),
        "batch complete"
    );
    for (path, message) in &summary.failures {
        eprintln!("failed: {}: {message}", path.display());
    }
    if summary.succeeded == 0 && summary.failed() > 0 {
        anyhow::bail!("all {} pages failed", summary.failed());
    }
    Ok(())
}

fn read_json(file: &Path) -> anyhow::Result<serde_json::Value> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", file.display()))
}
