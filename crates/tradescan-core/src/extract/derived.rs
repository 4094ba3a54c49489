//! Pip and percent profit derived from the entry and exit prices.
//!
//! One pip is fixed at 0.0001 of a price unit, whatever the instrument.
//! Three-decimal quotes (JPY pairs) therefore come out a hundred times too
//! large; the fixed multiplier is kept so stored figures stay comparable.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::trade::{OperationType, TradeRecord};

/// Price units to pips.
pub fn pip_multiplier() -> Decimal {
    Decimal::from(10_000)
}

/// Signed pip result, rounded to one decimal.
///
/// Sell trades profit when price falls; every other side is treated as a buy.
pub fn profit_pips(side: OperationType, entry: Decimal, exit: Decimal) -> Option<Decimal> {
    let moved = match side {
        OperationType::Sell => entry.checked_sub(exit)?,
        OperationType::Buy | OperationType::Unknown => exit.checked_sub(entry)?,
    };

    Some(moved.checked_mul(pip_multiplier())?.round_dp(1))
}

/// `pips / entry * 10000 * 100`, rounded to four decimals.
pub fn profit_percent(pips: Decimal, entry: Decimal) -> Option<Decimal> {
    let percent = pips
        .checked_div(entry)?
        .checked_mul(pip_multiplier())?
        .checked_mul(Decimal::ONE_HUNDRED)?;

    Some(percent.round_dp(4))
}

/// Fill `profit_pips` and `profit_percent` when both prices are known.
pub fn apply(record: &mut TradeRecord) {
    if record.entry_price.is_zero() || record.exit_price.is_zero() {
        debug!("Skipping profit calculation, entry or exit price missing");
        return;
    }

    let Some(pips) = profit_pips(record.operation_type, record.entry_price, record.exit_price)
    else {
        debug!("Skipping profit calculation, price difference overflowed");
        return;
    };

    record.profit_pips = pips;
    record.profit_percent = profit_percent(pips, record.entry_price).unwrap_or_default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_buy_pips() {
        assert_eq!(
            profit_pips(OperationType::Buy, dec("1.10500"), dec("1.10600")),
            Some(dec("10.0"))
        );
    }

    #[test]
    fn test_sell_pips() {
        assert_eq!(
            profit_pips(OperationType::Sell, dec("1.10500"), dec("1.10600")),
            Some(dec("-10.0"))
        );
    }

    #[test]
    fn test_unknown_side_uses_buy_direction() {
        assert_eq!(
            profit_pips(OperationType::Unknown, dec("1.10500"), dec("1.10450")),
            Some(dec("-5.0"))
        );
    }

    #[test]
    fn test_pips_rounding() {
        // 0.000125 * 10000 = 1.25, rounded half to even
        assert_eq!(
            profit_pips(OperationType::Buy, dec("1.100000"), dec("1.100125")),
            Some(dec("1.2"))
        );
    }

    #[test]
    fn test_percent() {
        // 10.0 / 1.10500 * 10000 * 100 = 9049773.75565...
        assert_eq!(
            profit_percent(dec("10.0"), dec("1.10500")),
            Some(dec("9049773.7557"))
        );
    }

    #[test]
    fn test_apply_skips_without_both_prices() {
        let mut record = TradeRecord {
            entry_price: dec("1.10500"),
            ..TradeRecord::default()
        };
        apply(&mut record);
        assert!(record.profit_pips.is_zero());
        assert!(record.profit_percent.is_zero());
    }

    #[test]
    fn test_apply_fills_both() {
        let mut record = TradeRecord {
            operation_type: OperationType::Sell,
            entry_price: dec("1.10600"),
            exit_price: dec("1.10500"),
            ..TradeRecord::default()
        };
        apply(&mut record);
        assert_eq!(record.profit_pips, dec("10.0"));
        assert_eq!(record.profit_percent, dec("9041591.3201"));
    }
}
