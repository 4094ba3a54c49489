//! Line-scanning trade record extractor.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::builder::RecordBuilder;
use super::line::Line;
use super::rules::{FieldRule, ProfitFallback, default_rules};
use crate::models::config::ExtractionConfig;
use crate::models::trade::{TradeField, TradeRecord};

/// Result of a trade extraction with bookkeeping for callers.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Extracted trade.
    pub record: TradeRecord,
    /// Number of transcript lines scanned.
    pub line_count: usize,
    /// Fields left at their default.
    pub missing_fields: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-table driven extractor.
///
/// Holds only its configuration and rule table, so one instance can serve
/// any number of transcripts, from any number of threads.
pub struct TradeRecordExtractor {
    config: ExtractionConfig,
    rules: Vec<Box<dyn FieldRule>>,
}

impl TradeRecordExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::from_config(ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: ExtractionConfig) -> Self {
        let rules = default_rules(&config);
        Self { config, rules }
    }

    /// Create an extractor with a custom rule table.
    pub fn with_rules(rules: Vec<Box<dyn FieldRule>>) -> Self {
        Self {
            config: ExtractionConfig::default(),
            rules,
        }
    }

    /// Set the profit fallback strategy.
    pub fn with_profit_fallback(mut self, fallback: ProfitFallback) -> Self {
        self.config.profit_fallback = fallback;
        self.rules = default_rules(&self.config);
        self
    }

    /// Set timestamp validation.
    pub fn with_timestamp_validation(mut self, validate: bool) -> Self {
        self.config.validate_timestamps = validate;
        self.rules = default_rules(&self.config);
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Extract a trade from transcript lines, in order.
    pub fn extract<I, S>(&self, lines: I) -> TradeRecord
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scan(lines).0
    }

    /// Extract a trade from a whole OCR text blob.
    pub fn extract_text(&self, text: &str) -> TradeRecord {
        self.extract(text.lines())
    }

    /// Extract a trade and report what was left unrecognized.
    pub fn extract_report<I, S>(&self, lines: I) -> ExtractionReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let (record, line_count) = self.scan(lines);

        let missing_fields = record
            .missing_fields()
            .iter()
            .map(TradeField::to_string)
            .collect();

        ExtractionReport {
            record,
            line_count,
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn scan<I, S>(&self, lines: I) -> (TradeRecord, usize)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = RecordBuilder::new();
        let mut line_count = 0;

        for raw in lines {
            line_count += 1;
            let line = Line::new(raw.as_ref());
            if line.is_blank() {
                continue;
            }

            for rule in &self.rules {
                if builder.is_filled(rule.targets()) {
                    continue;
                }

                if let Some(value) = rule.try_extract(&line) {
                    if builder.apply(value) {
                        debug!("Rule {} matched line {}", rule.name(), line_count);
                    }
                }
            }
        }

        info!("Scanned {} transcript lines", line_count);

        let record = builder.finish();

        debug!(
            "Extracted {} {} with {} fields missing",
            if record.symbol.is_empty() { "?" } else { record.symbol.as_str() },
            record.operation_type,
            record.missing_fields().len()
        );

        (record, line_count)
    }
}

impl Default for TradeRecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
