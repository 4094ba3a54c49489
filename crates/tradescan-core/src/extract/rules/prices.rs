//! Five-decimal quotes: entry/exit pair and stop-loss/take-profit levels.

use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{PRICE_5DP, STOP_LOSS, TAKE_PROFIT};
use super::{FieldRule, FieldValue, Pair, parse_number};
use crate::extract::line::Line;
use crate::models::trade::TradeField;

/// All five-decimal quotes of a line, in reading order.
fn quotes<'l>(text: &'l str) -> impl Iterator<Item = Decimal> + 'l {
    PRICE_5DP
        .find_iter(text)
        .filter_map(|m| parse_number(m.as_str()))
}

/// First quote after the marker, or the first quote of the line when nothing
/// follows the marker.
fn quote_near_marker(line: &Line<'_>, marker: &Regex) -> Option<Decimal> {
    let found = marker.find(line.raw)?;

    quotes(&line.raw[found.end()..])
        .next()
        .or_else(|| quotes(line.raw).next())
}

/// Entry and exit price: the first and second quotes seen.
pub struct PricePairRule;

impl FieldRule for PricePairRule {
    fn name(&self) -> &'static str {
        "price_pair"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::EntryPrice, TradeField::ExitPrice]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        Pair::first_two(quotes(&line.normalized)).map(FieldValue::Prices)
    }
}

/// Stop-loss level from a line carrying a stop-loss marker.
pub struct StopLossRule;

impl FieldRule for StopLossRule {
    fn name(&self) -> &'static str {
        "sl_price"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::SlPrice]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        quote_near_marker(line, &STOP_LOSS).map(FieldValue::StopLoss)
    }
}

/// Take-profit level from a line carrying a take-profit marker.
pub struct TakeProfitRule;

impl FieldRule for TakeProfitRule {
    fn name(&self) -> &'static str {
        "tp_price"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::TpPrice]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        quote_near_marker(line, &TAKE_PROFIT).map(FieldValue::TakeProfit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_price_pair() {
        assert_eq!(
            PricePairRule.try_extract(&Line::new("1.10500 → 1.10600 1.10700")),
            Some(FieldValue::Prices(Pair {
                first: dec("1.10500"),
                second: Some(dec("1.10600")),
            }))
        );
        assert_eq!(
            PricePairRule.try_extract(&Line::new("Open 1.10500")),
            Some(FieldValue::Prices(Pair {
                first: dec("1.10500"),
                second: None,
            }))
        );
        assert_eq!(PricePairRule.try_extract(&Line::new("1.1050 1.106")), None);
    }

    #[test]
    fn test_levels_need_marker() {
        assert_eq!(StopLossRule.try_extract(&Line::new("1.09000")), None);
        assert_eq!(
            StopLossRule.try_extract(&Line::new("S/L: 1.09000")),
            Some(FieldValue::StopLoss(dec("1.09000")))
        );
        assert_eq!(
            TakeProfitRule.try_extract(&Line::new("Тейк-профит 1.12000")),
            Some(FieldValue::TakeProfit(dec("1.12000")))
        );
    }

    #[test]
    fn test_levels_on_shared_line() {
        let line = Line::new("S/L: 1.09000   T/P: 1.12000");
        assert_eq!(
            StopLossRule.try_extract(&line),
            Some(FieldValue::StopLoss(dec("1.09000")))
        );
        assert_eq!(
            TakeProfitRule.try_extract(&line),
            Some(FieldValue::TakeProfit(dec("1.12000")))
        );
    }

    #[test]
    fn test_level_before_marker() {
        assert_eq!(
            StopLossRule.try_extract(&Line::new("1.09000 sl")),
            Some(FieldValue::StopLoss(dec("1.09000")))
        );
    }
}
