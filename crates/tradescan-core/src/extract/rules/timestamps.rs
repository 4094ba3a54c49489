//! Open and close timestamps.

use chrono::NaiveDateTime;

use super::patterns::TIMESTAMP;
use super::{FieldRule, FieldValue, Pair};
use crate::extract::line::Line;
use crate::models::trade::TradeField;

/// Platform timestamp format.
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Up to two `YYYY.MM.DD HH:MM:SS` timestamps per line.
pub struct TimestampPairRule {
    validate: bool,
}

impl TimestampPairRule {
    /// With `validate`, matches that are not real dates (2024.13.45) are dropped.
    pub fn new(validate: bool) -> Self {
        Self { validate }
    }

    fn is_valid(&self, token: &str) -> bool {
        !self.validate || NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT).is_ok()
    }
}

impl Default for TimestampPairRule {
    fn default() -> Self {
        Self::new(false)
    }
}

impl FieldRule for TimestampPairRule {
    fn name(&self) -> &'static str {
        "timestamps"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::EntryTime, TradeField::ExitTime]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        let stamps = TIMESTAMP
            .find_iter(&line.normalized)
            .map(|m| m.as_str())
            .filter(|s| self.is_valid(s))
            .map(str::to_string);

        Pair::first_two(stamps).map(FieldValue::Timestamps)
    }
}
