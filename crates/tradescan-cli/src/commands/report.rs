//! Report command - aggregate statistics over the journal.

use std::path::PathBuf;

use clap::Args;

use tradescan_core::{ReportFormatter, TradeJournal, TradingReport, UserReport, UserSummary};

use super::{load_config, read_journal};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Only report trades of this user
    #[arg(short, long, conflicts_with = "by_user")]
    user_id: Option<String>,

    /// Break statistics down by user name
    #[arg(long)]
    by_user: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Journal file (default: from config)
    #[arg(long)]
    journal: Option<PathBuf>,
}

pub async fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let journal = read_journal(&config, args.journal.as_deref());
    let entries = journal.entries()?;

    let output = if let Some(user_id) = &args.user_id {
        let report = UserReport::for_user(&entries, user_id);
        if args.json {
            serde_json::to_string_pretty(&report)?
        } else {
            ReportFormatter::user(report.as_ref())
        }
    } else if args.by_user {
        let summaries = UserSummary::by_user(&entries);
        if args.json {
            serde_json::to_string_pretty(&summaries)?
        } else {
            ReportFormatter::users(&summaries)
        }
    } else {
        let report = TradingReport::from_entries(&entries);
        if args.json {
            serde_json::to_string_pretty(&report)?
        } else {
            ReportFormatter::trading(report.as_ref())
        }
    };

    println!("{}", output);

    Ok(())
}
