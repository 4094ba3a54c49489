//! Batch command for many transcript files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use tradescan_core::models::trade::TradeRecord;
use tradescan_core::{JournalEntry, TradeJournal, TradeRecordExtractor};

use super::extract::{OutputFormat, format_record};
use super::{load_config, open_journal, read_transcript, resolve_username};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of transcript files
    #[arg(required = true)]
    input: String,

    /// Record every trade for this user id
    #[arg(short, long)]
    user_id: Option<String>,

    /// Display name of the user
    #[arg(short = 'n', long, requires = "user_id")]
    username: Option<String>,

    /// Also write one output file per transcript into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write a summary CSV to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Journal file (default: from config)
    #[arg(long)]
    journal: Option<PathBuf>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    record: Option<TradeRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} transcripts to process",
        style("ℹ").blue(),
        files.len()
    );

    let journal = match &args.user_id {
        Some(_) => Some(open_journal(&config, args.journal.as_deref())?),
        None => None,
    };

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Extractions are independent; one shared extractor serves every worker
    let extractor = Arc::new(TradeRecordExtractor::from_config(config.extraction.clone()));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let extractor = Arc::clone(&extractor);
        let pb = pb.clone();

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let result = extract_file(&path, &extractor);
            pb.inc(1);

            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            match result {
                Ok(record) => (index, FileResult {
                    path,
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                }),
                Err(e) => (index, FileResult {
                    path,
                    record: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                }),
            }
        });
    }

    let mut indexed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        indexed.push(joined?);
    }
    pb.finish_and_clear();

    // Restore input order so the journal is deterministic
    indexed.sort_by_key(|(index, _)| *index);
    let results: Vec<FileResult> = indexed.into_iter().map(|(_, r)| r).collect();

    if !args.continue_on_error {
        if let Some(failed) = results.iter().find(|r| r.error.is_some()) {
            let error_msg = failed.error.as_deref().unwrap_or("unknown error");
            error!("Failed to process {}: {}", failed.path.display(), error_msg);
            anyhow::bail!("Processing failed for {}: {}", failed.path.display(), error_msg);
        }
    }

    let username = resolve_username(args.username.clone(), &config);
    for result in &results {
        let Some(record) = &result.record else {
            warn!(
                "Failed to process {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
            continue;
        };

        if let (Some(journal), Some(user_id)) = (&journal, &args.user_id) {
            let entry = JournalEntry::new(user_id.clone(), username.clone(), record.clone());
            journal.append(&entry)?;
        }

        if let Some(output_dir) = &args.output_dir {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("trade");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_record(record, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.record.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} transcripts in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );
    if let (Some(journal), Some(_)) = (&journal, &args.user_id) {
        println!("   recorded to {}", journal.path().display());
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn extract_file(path: &Path, extractor: &TradeRecordExtractor) -> anyhow::Result<TradeRecord> {
    let text = read_transcript(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("Transcript is empty");
    }
    Ok(extractor.extract_text(&text))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "symbol",
        "operation_type",
        "profit_currency",
        "profit_pips",
        "missing_fields",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                &record.symbol,
                record.operation_type.as_str(),
                &record.profit_currency.to_string(),
                &format!("{:.1}", record.profit_pips),
                &record.missing_fields().len().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
