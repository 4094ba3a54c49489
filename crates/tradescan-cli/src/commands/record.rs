//! Record command - extract a trade and append it to the journal.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{info, warn};

use tradescan_core::{JournalEntry, TradeJournal, TradeRecordExtractor};

use super::{load_config, open_journal, read_transcript, resolve_username};

/// Arguments for the record command.
#[derive(Args)]
pub struct RecordArgs {
    /// Transcript file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Id of the user the trade belongs to
    #[arg(short, long)]
    user_id: String,

    /// Display name of the user
    #[arg(short = 'n', long)]
    username: Option<String>,

    /// Journal file (default: from config)
    #[arg(long)]
    journal: Option<PathBuf>,
}

pub async fn run(args: RecordArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = read_transcript(&args.input)?;
    if text.trim().is_empty() {
        anyhow::bail!("Transcript is empty: {}", args.input.display());
    }

    let journal = open_journal(&config, args.journal.as_deref())?;
    let username = resolve_username(args.username, &config);

    let record = TradeRecordExtractor::from_config(config.extraction).extract_text(&text);
    if record.is_empty() {
        warn!("Nothing recognized in {}", args.input.display());
    }

    let entry = JournalEntry::new(args.user_id, username, record);
    journal.append(&entry)?;
    info!("Appended trade to {}", journal.path().display());

    let symbol = if entry.record.symbol.is_empty() { "?" } else { entry.record.symbol.as_str() };
    println!(
        "{} Recorded {} {} ({:.1} pips) for {}",
        style("✓").green(),
        symbol,
        entry.record.operation_type,
        entry.record.profit_pips,
        entry.username
    );

    Ok(())
}
