//! Extract command - pull a trade record out of one transcript.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use tradescan_core::models::trade::TradeRecord;
use tradescan_core::TradeRecordExtractor;

use super::{load_config, read_transcript};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Transcript file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that were not recognized
    #[arg(long)]
    show_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = read_transcript(&args.input)?;
    if text.trim().is_empty() {
        anyhow::bail!("Transcript is empty: {}", args.input.display());
    }

    info!("Extracting trade from {}", args.input.display());

    let extractor = TradeRecordExtractor::from_config(config.extraction);
    let report = extractor.extract_report(text.lines());
    debug!("Extraction took {}ms", report.processing_time_ms);

    let output = format_record(&report.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing {
        eprintln!();
        if report.missing_fields.is_empty() {
            eprintln!("{} All fields recognized", style("ℹ").blue());
        } else {
            eprintln!(
                "{} Not recognized: {}",
                style("ℹ").blue(),
                report.missing_fields.join(", ")
            );
        }
    }

    Ok(())
}

pub fn format_record(record: &TradeRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &TradeRecord) -> anyhow::Result<String> {
    // Header row comes from the record's field names
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.serialize(record)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &TradeRecord) -> String {
    let mut output = String::new();

    let symbol = if record.symbol.is_empty() { "?" } else { record.symbol.as_str() };
    output.push_str(&format!("Trade: {} {}\n", symbol, record.operation_type));
    if !record.order_id.is_empty() {
        output.push_str(&format!("Order: #{}\n", record.order_id));
    }
    output.push_str(&format!("Volume: {}\n", record.volume));
    output.push('\n');

    output.push_str("Prices:\n");
    output.push_str(&format!("  Entry: {}\n", record.entry_price));
    output.push_str(&format!("  Exit:  {}\n", record.exit_price));
    output.push_str(&format!("  S/L:   {}\n", record.sl_price));
    output.push_str(&format!("  T/P:   {}\n", record.tp_price));
    output.push('\n');

    output.push_str("Result:\n");
    output.push_str(&format!("  Profit:     {}\n", record.profit_currency));
    output.push_str(&format!("  Pips:       {:.1}\n", record.profit_pips));
    output.push_str(&format!("  Percent:    {}\n", record.profit_percent));
    output.push_str(&format!("  Swap:       {}\n", record.swap));
    output.push_str(&format!("  Commission: {}\n", record.commission));

    if !record.entry_time.is_empty() || !record.exit_time.is_empty() {
        output.push_str(&format!(
            "\nOpened {} / closed {}\n",
            record.entry_time, record.exit_time
        ));
    }

    output
}
