//! CLI application for trade screenshot transcripts.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, record, report};

/// Trade screenshot scanner - extract trade records from OCR transcripts
#[derive(Parser)]
#[command(name = "tradescan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a trade from one transcript
    Extract(extract::ExtractArgs),

    /// Extract a trade and append it to the journal
    Record(record::RecordArgs),

    /// Extract and record many transcripts
    Batch(batch::BatchArgs),

    /// Show trading statistics from the journal
    Report(report::ReportArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Record(args) => record::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Report(args) => report::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
