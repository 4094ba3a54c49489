//! Profit extraction in account currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::patterns::{CURRENCY_AMOUNT, NUMBER_TOKEN};
use super::{FieldRule, FieldValue, parse_number};
use crate::extract::line::Line;
use crate::models::trade::TradeField;

/// How to guess profit on a line that has no currency marker.
///
/// The guess is weak: it is only kept when no marked profit shows up anywhere
/// in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ProfitFallback {
    /// Never guess.
    Disabled,

    /// Take the last bare number of a line with at least `min_tokens` bare
    /// numbers, if it is nonzero and within `[-max_abs, max_abs]`.
    LastOfMany { min_tokens: usize, max_abs: Decimal },
}

impl Default for ProfitFallback {
    fn default() -> Self {
        ProfitFallback::LastOfMany {
            min_tokens: 3,
            max_abs: Decimal::from(1000),
        }
    }
}

impl ProfitFallback {
    /// Candidate profit for a line without a currency marker.
    pub fn candidate(&self, line: &Line<'_>) -> Option<Decimal> {
        match self {
            ProfitFallback::Disabled => None,
            ProfitFallback::LastOfMany { min_tokens, max_abs } => {
                let numbers: Vec<&str> = line
                    .tokens()
                    .filter(|t| NUMBER_TOKEN.is_match(t))
                    .collect();

                if numbers.len() < *min_tokens {
                    return None;
                }

                let last = parse_number(numbers.last()?)?;
                (!last.is_zero() && last.abs() <= *max_abs).then_some(last)
            }
        }
    }
}

/// Profit next to `$`, `USD`, `€` or `EUR`, with a fallback strategy.
pub struct CurrencyProfitRule {
    fallback: ProfitFallback,
}

impl CurrencyProfitRule {
    pub fn new(fallback: ProfitFallback) -> Self {
        Self { fallback }
    }

    fn marked_amount(line: &Line<'_>) -> Option<Decimal> {
        let caps = CURRENCY_AMOUNT.captures(&line.normalized)?;

        if let Some(post) = caps.name("post") {
            return parse_number(post.as_str());
        }

        let amount = parse_number(caps.name("pre")?.as_str())?;
        match caps.name("sign").map(|m| m.as_str()) {
            Some("-") => Some(-amount.abs()),
            _ => Some(amount),
        }
    }
}

impl Default for CurrencyProfitRule {
    fn default() -> Self {
        Self::new(ProfitFallback::default())
    }
}

impl FieldRule for CurrencyProfitRule {
    fn name(&self) -> &'static str {
        "currency_profit"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::ProfitCurrency]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        if CURRENCY_AMOUNT.is_match(&line.normalized) {
            return Self::marked_amount(line).map(FieldValue::ProfitCurrency);
        }

        self.fallback
            .candidate(line)
            .map(FieldValue::ProfitFallback)
    }
}
