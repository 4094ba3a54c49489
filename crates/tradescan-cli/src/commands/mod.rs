//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod record;
pub mod report;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use tradescan_core::models::config::TradescanConfig;
use tradescan_core::CsvJournal;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tradescan")
        .join("config.json")
}

/// Resolve the configuration file: the `--config` flag wins, then the default path.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TradescanConfig> {
    if let Some(path) = config_path {
        return Ok(TradescanConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(TradescanConfig::from_file(&path)?)
    } else {
        Ok(TradescanConfig::default())
    }
}

/// Read a transcript from a file, or from stdin when the input is `-`.
pub fn read_transcript(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    Ok(std::fs::read_to_string(input)?)
}

/// Journal path: an explicit override, else the configured one.
fn journal_path<'a>(config: &'a TradescanConfig, journal: Option<&'a Path>) -> &'a Path {
    let path = journal.unwrap_or(config.journal.path.as_path());
    debug!("Using journal {}", path.display());
    path
}

/// Open the journal for appending, creating it if needed.
pub fn open_journal(config: &TradescanConfig, journal: Option<&Path>) -> anyhow::Result<CsvJournal> {
    Ok(CsvJournal::open(journal_path(config, journal))?)
}

/// Open the journal for reading without touching the disk.
pub fn read_journal(config: &TradescanConfig, journal: Option<&Path>) -> CsvJournal {
    CsvJournal::open_read_only(journal_path(config, journal))
}

/// Display name to record: the explicit one, else the configured default.
pub fn resolve_username(username: Option<String>, config: &TradescanConfig) -> Option<String> {
    username
        .filter(|name| !name.trim().is_empty())
        .or_else(|| Some(config.journal.default_username.clone()))
}
