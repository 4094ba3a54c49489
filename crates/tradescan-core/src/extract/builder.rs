//! Fill-once record builder.

use rust_decimal::Decimal;

use super::derived;
use super::rules::{FieldValue, Pair};
use crate::models::trade::{TradeField, TradeRecord};

/// Accumulates rule proposals into a [`TradeRecord`].
///
/// A field accepts the first non-default value offered and ignores every
/// later one.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    record: TradeRecord,
    profit_fallback: Option<Decimal>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every given field already holds a value.
    pub fn is_filled(&self, fields: &[TradeField]) -> bool {
        fields.iter().all(|f| self.record.is_set(*f))
    }

    /// Offer a value. Returns true if any field changed.
    pub fn apply(&mut self, value: FieldValue) -> bool {
        let r = &mut self.record;
        match value {
            FieldValue::Symbol(s) => fill_string(&mut r.symbol, s),
            FieldValue::Operation(side) => {
                if r.operation_type.is_known() || !side.is_known() {
                    return false;
                }
                r.operation_type = side;
                true
            }
            FieldValue::Volume(v) => fill_decimal(&mut r.volume, v),
            FieldValue::ProfitCurrency(v) => fill_decimal(&mut r.profit_currency, v),
            FieldValue::ProfitFallback(v) => {
                if self.profit_fallback.is_some() || v.is_zero() {
                    return false;
                }
                self.profit_fallback = Some(v);
                true
            }
            FieldValue::Prices(pair) => {
                fill_pair(&mut r.entry_price, &mut r.exit_price, pair, fill_decimal)
            }
            FieldValue::StopLoss(v) => fill_decimal(&mut r.sl_price, v),
            FieldValue::TakeProfit(v) => fill_decimal(&mut r.tp_price, v),
            FieldValue::Swap(v) => fill_decimal(&mut r.swap, v),
            FieldValue::Commission(v) => fill_decimal(&mut r.commission, v),
            FieldValue::OrderId(s) => fill_string(&mut r.order_id, s),
            FieldValue::Timestamps(pair) => {
                fill_pair(&mut r.entry_time, &mut r.exit_time, pair, fill_string)
            }
        }
    }

    /// Resolve the profit fallback and compute derived fields.
    pub fn finish(mut self) -> TradeRecord {
        if self.record.profit_currency.is_zero() {
            if let Some(guess) = self.profit_fallback {
                self.record.profit_currency = guess;
            }
        }

        derived::apply(&mut self.record);
        self.record
    }
}

fn fill_decimal(slot: &mut Decimal, value: Decimal) -> bool {
    if !slot.is_zero() || value.is_zero() {
        return false;
    }
    *slot = value;
    true
}

fn fill_string(slot: &mut String, value: String) -> bool {
    if !slot.is_empty() || value.is_empty() {
        return false;
    }
    *slot = value;
    true
}

/// Two values go to their own slots. A single value goes to the first free
/// slot, so a pair split across two lines still lands first-then-second.
fn fill_pair<T: Clone>(
    first: &mut T,
    second: &mut T,
    pair: Pair<T>,
    fill: fn(&mut T, T) -> bool,
) -> bool {
    match pair.second {
        Some(value) => {
            let a = fill(first, pair.first);
            let b = fill(second, value);
            a || b
        }
        None => fill(first, pair.first.clone()) || fill(second, pair.first),
    }
}
