//! Rule-based field extractors for trade transcripts.
//!
//! Every rule looks at a single [`Line`] and either proposes a value for the
//! fields it targets or stays silent. Rules never see the record being built;
//! the driver decides whether a proposal is accepted.

pub mod charges;
pub mod instrument;
pub mod order;
pub mod patterns;
pub mod prices;
pub mod profit;
pub mod timestamps;

pub use charges::{CommissionRule, SwapRule};
pub use instrument::{OperationRule, SymbolRule, VolumeRule};
pub use order::OrderIdRule;
pub use prices::{PricePairRule, StopLossRule, TakeProfitRule};
pub use profit::{CurrencyProfitRule, ProfitFallback};
pub use timestamps::TimestampPairRule;

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::extract::line::Line;
use crate::models::config::ExtractionConfig;
use crate::models::trade::{OperationType, TradeField};

/// Trait for single-line field rules.
pub trait FieldRule: Send + Sync {
    /// Short rule name used in logs.
    fn name(&self) -> &'static str;

    /// Fields this rule fills. The driver skips the rule once all are set.
    fn targets(&self) -> &'static [TradeField];

    /// Propose a value from one line.
    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue>;
}

/// Up to two values found on the same line, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair<T> {
    pub first: T,
    pub second: Option<T>,
}

impl<T> Pair<T> {
    /// Build a pair from the first two items of an iterator.
    pub fn first_two(mut items: impl Iterator<Item = T>) -> Option<Self> {
        let first = items.next()?;
        Some(Self {
            first,
            second: items.next(),
        })
    }
}

/// A value proposed by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Symbol(String),
    Operation(OperationType),
    Volume(Decimal),
    /// Profit read next to a currency marker.
    ProfitCurrency(Decimal),
    /// Profit guessed by the fallback strategy; loses to any marked profit.
    ProfitFallback(Decimal),
    Prices(Pair<Decimal>),
    StopLoss(Decimal),
    TakeProfit(Decimal),
    Swap(Decimal),
    Commission(Decimal),
    OrderId(String),
    Timestamps(Pair<String>),
}

/// Build the standard rule table, in evaluation order.
pub fn default_rules(config: &ExtractionConfig) -> Vec<Box<dyn FieldRule>> {
    vec![
        Box::new(CurrencyProfitRule::new(config.profit_fallback.clone())),
        Box::new(SymbolRule),
        Box::new(OperationRule),
        Box::new(VolumeRule),
        Box::new(PricePairRule),
        Box::new(StopLossRule),
        Box::new(TakeProfitRule),
        Box::new(SwapRule),
        Box::new(CommissionRule),
        Box::new(OrderIdRule),
        Box::new(TimestampPairRule::new(config.validate_timestamps)),
    ]
}

/// Parse a number as printed on a trading screen ("1,234.56", "12,34", "-7").
pub fn parse_number(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '+'))
        .collect();
    let cleaned = cleaned.trim_start_matches('+');

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // "1,234.56": comma groups thousands
        (Some(c), Some(d)) if c < d => cleaned.replace(',', ""),
        // "1.234,56": dot groups thousands
        (Some(_), Some(_)) => cleaned.replace('.', "").replace(',', "."),
        (Some(_), None) if is_thousands_grouped(cleaned) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned.to_string(),
    };

    Decimal::from_str(&normalized).ok()
}

fn is_thousands_grouped(s: &str) -> bool {
    let digits = s.trim_start_matches('-');
    let mut groups = digits.split(',');
    let head_ok = groups
        .next()
        .is_some_and(|h| (1..=3).contains(&h.len()));
    let rest: Vec<&str> = groups.collect();
    head_ok && rest.len() > 1 && rest.iter().all(|g| g.len() == 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.34"), Some(dec("12.34")));
        assert_eq!(parse_number("-12.34"), Some(dec("-12.34")));
        assert_eq!(parse_number("+5"), Some(dec("5")));
        assert_eq!(parse_number("12,34"), Some(dec("12.34")));
        assert_eq!(parse_number("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_number("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_number("1,234,567"), Some(dec("1234567")));
        // A single comma group is a decimal comma
        assert_eq!(parse_number("1,250"), Some(dec("1.250")));
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_pair_first_two() {
        assert_eq!(Pair::<u8>::first_two(std::iter::empty()), None);
        assert_eq!(
            Pair::first_two([1, 2, 3].into_iter()),
            Some(Pair { first: 1, second: Some(2) })
        );
        assert_eq!(
            Pair::first_two([1].into_iter()),
            Some(Pair { first: 1, second: None })
        );
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<&str> = default_rules(&ExtractionConfig::default())
            .iter()
            .map(|r| r.name())
            .collect();

        assert_eq!(names.first(), Some(&"currency_profit"));
        assert_eq!(names.last(), Some(&"timestamps"));
        assert_eq!(names.len(), 11);
    }
}
