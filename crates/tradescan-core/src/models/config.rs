//! Configuration structures for extraction and the trade journal.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extract::rules::ProfitFallback;
use crate::models::journal::UNKNOWN_USER;

/// Main configuration for tradescan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradescanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Journal storage configuration.
    pub journal: JournalConfig,
}

/// Trade extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Strategy for guessing profit when no currency marker is present.
    pub profit_fallback: ProfitFallback,

    /// Also reject pattern matches that do not name a real calendar date and time.
    pub validate_timestamps: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            profit_fallback: ProfitFallback::default(),
            validate_timestamps: false,
        }
    }
}

/// Journal storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Path of the CSV journal.
    pub path: PathBuf,

    /// Display name recorded when none is given.
    pub default_username: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("trades.csv"),
            default_username: UNKNOWN_USER.to_string(),
        }
    }
}

impl TradescanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TradescanError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TradescanConfig =
            serde_json::from_str(r#"{"journal": {"path": "/tmp/j.csv"}}"#).unwrap();

        assert_eq!(config.journal.path, PathBuf::from("/tmp/j.csv"));
        assert_eq!(config.journal.default_username, "Unknown");
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_disabled_fallback_from_json() {
        let config: TradescanConfig = serde_json::from_str(
            r#"{"extraction": {"profit_fallback": {"strategy": "disabled"}}}"#,
        )
        .unwrap();

        assert_eq!(config.extraction.profit_fallback, ProfitFallback::Disabled);
        assert!(!config.extraction.validate_timestamps);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = TradescanConfig::from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(TradescanError::Io(_))));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let broken = TradescanConfig::from_file(&path);
        assert!(matches!(broken, Err(TradescanError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = TradescanConfig::default();
        config.journal.default_username = "desk".to_string();
        config.save(&path).unwrap();

        let loaded = TradescanConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
