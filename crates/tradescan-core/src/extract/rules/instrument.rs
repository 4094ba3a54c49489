//! Instrument symbol, trade side and volume.

use rust_decimal::Decimal;

use super::patterns::{BUY, SELL, SYMBOL, VOLUME_TOKEN};
use super::{FieldRule, FieldValue};
use crate::extract::line::Line;
use crate::models::trade::{OperationType, TradeField};

/// First standalone run of exactly six uppercase letters.
pub struct SymbolRule;

impl FieldRule for SymbolRule {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::Symbol]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        SYMBOL
            .find(&line.normalized)
            .map(|m| FieldValue::Symbol(m.as_str().to_string()))
    }
}

/// Whole-word "sell" or "buy", any case. Sell is checked first.
pub struct OperationRule;

impl FieldRule for OperationRule {
    fn name(&self) -> &'static str {
        "operation_type"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::OperationType]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        let side = if SELL.is_match(&line.normalized) {
            OperationType::Sell
        } else if BUY.is_match(&line.normalized) {
            OperationType::Buy
        } else {
            return None;
        };

        Some(FieldValue::Operation(side))
    }
}

/// First integer token, with or without a lot unit.
pub struct VolumeRule;

impl FieldRule for VolumeRule {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::Volume]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        line.tokens()
            .map(|t| t.trim_end_matches([',', ';']))
            .find_map(|t| VOLUME_TOKEN.captures(t))
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .map(|v| FieldValue::Volume(Decimal::from(v)))
    }
}
