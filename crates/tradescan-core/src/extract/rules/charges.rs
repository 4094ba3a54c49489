//! Swap and commission charges.

use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{COMMISSION, SIGNED_NUMBER, SWAP};
use super::{FieldRule, FieldValue, parse_number};
use crate::extract::line::Line;
use crate::models::trade::TradeField;

/// First signed number after the marker, falling back to the first on the line.
fn charge_near_marker(line: &Line<'_>, marker: &Regex) -> Option<Decimal> {
    let text = &line.normalized;
    let found = marker.find(text)?;

    SIGNED_NUMBER
        .find(&text[found.end()..])
        .or_else(|| SIGNED_NUMBER.find(text))
        .and_then(|m| parse_number(m.as_str()))
}

/// Swap from a line carrying "swap" or "своп".
pub struct SwapRule;

impl FieldRule for SwapRule {
    fn name(&self) -> &'static str {
        "swap"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::Swap]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        charge_near_marker(line, &SWAP).map(FieldValue::Swap)
    }
}

/// Commission from a line carrying "commission" or "комиссия".
pub struct CommissionRule;

impl FieldRule for CommissionRule {
    fn name(&self) -> &'static str {
        "commission"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::Commission]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        charge_near_marker(line, &COMMISSION).map(FieldValue::Commission)
    }
}
