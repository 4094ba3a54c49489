//! Trade record model produced from one screenshot transcript.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of the trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    Buy,
    Sell,
    /// No side was recognized.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl OperationType {
    /// Parse a stored or recognized side, case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "buy" => OperationType::Buy,
            "sell" => OperationType::Sell,
            _ => OperationType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Buy => "Buy",
            OperationType::Sell => "Sell",
            OperationType::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OperationType::Unknown)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a [`TradeRecord`], in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeField {
    Symbol,
    OperationType,
    Volume,
    EntryPrice,
    ExitPrice,
    ProfitCurrency,
    ProfitPips,
    ProfitPercent,
    SlPrice,
    TpPrice,
    Swap,
    Commission,
    OrderId,
    EntryTime,
    ExitTime,
}

impl TradeField {
    pub const ALL: [TradeField; 15] = [
        TradeField::Symbol,
        TradeField::OperationType,
        TradeField::Volume,
        TradeField::EntryPrice,
        TradeField::ExitPrice,
        TradeField::ProfitCurrency,
        TradeField::ProfitPips,
        TradeField::ProfitPercent,
        TradeField::SlPrice,
        TradeField::TpPrice,
        TradeField::Swap,
        TradeField::Commission,
        TradeField::OrderId,
        TradeField::EntryTime,
        TradeField::ExitTime,
    ];

    /// Column name used in the journal and in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeField::Symbol => "symbol",
            TradeField::OperationType => "operation_type",
            TradeField::Volume => "volume",
            TradeField::EntryPrice => "entry_price",
            TradeField::ExitPrice => "exit_price",
            TradeField::ProfitCurrency => "profit_currency",
            TradeField::ProfitPips => "profit_pips",
            TradeField::ProfitPercent => "profit_percent",
            TradeField::SlPrice => "sl_price",
            TradeField::TpPrice => "tp_price",
            TradeField::Swap => "swap",
            TradeField::Commission => "commission",
            TradeField::OrderId => "order_id",
            TradeField::EntryTime => "entry_time",
            TradeField::ExitTime => "exit_time",
        }
    }
}

impl fmt::Display for TradeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single trade recovered from a screenshot transcript.
///
/// Every field has a default (zero, empty or [`OperationType::Unknown`]) that
/// stands for "not recognized".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Instrument, six uppercase letters (e.g. EURUSD).
    pub symbol: String,

    /// Buy or sell.
    pub operation_type: OperationType,

    /// Volume in lots.
    pub volume: Decimal,

    /// Opening price.
    pub entry_price: Decimal,

    /// Closing price.
    pub exit_price: Decimal,

    /// Profit in account currency.
    pub profit_currency: Decimal,

    /// Profit in pips, one decimal place.
    pub profit_pips: Decimal,

    /// Profit percent, four decimal places.
    pub profit_percent: Decimal,

    /// Stop-loss level.
    pub sl_price: Decimal,

    /// Take-profit level.
    pub tp_price: Decimal,

    /// Swap charged or credited.
    pub swap: Decimal,

    /// Broker commission.
    pub commission: Decimal,

    /// Order ticket number.
    pub order_id: String,

    /// Opening time, `YYYY.MM.DD HH:MM:SS`.
    pub entry_time: String,

    /// Closing time, `YYYY.MM.DD HH:MM:SS`.
    pub exit_time: String,
}

impl TradeRecord {
    /// Create a record with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a field holds a non-default value.
    pub fn is_set(&self, field: TradeField) -> bool {
        match field {
            TradeField::Symbol => !self.symbol.is_empty(),
            TradeField::OperationType => self.operation_type.is_known(),
            TradeField::Volume => !self.volume.is_zero(),
            TradeField::EntryPrice => !self.entry_price.is_zero(),
            TradeField::ExitPrice => !self.exit_price.is_zero(),
            TradeField::ProfitCurrency => !self.profit_currency.is_zero(),
            TradeField::ProfitPips => !self.profit_pips.is_zero(),
            TradeField::ProfitPercent => !self.profit_percent.is_zero(),
            TradeField::SlPrice => !self.sl_price.is_zero(),
            TradeField::TpPrice => !self.tp_price.is_zero(),
            TradeField::Swap => !self.swap.is_zero(),
            TradeField::Commission => !self.commission.is_zero(),
            TradeField::OrderId => !self.order_id.is_empty(),
            TradeField::EntryTime => !self.entry_time.is_empty(),
            TradeField::ExitTime => !self.exit_time.is_empty(),
        }
    }

    /// Names of the fields still at their default.
    pub fn missing_fields(&self) -> Vec<TradeField> {
        TradeField::ALL
            .iter()
            .copied()
            .filter(|f| !self.is_set(*f))
            .collect()
    }

    /// True when nothing at all was recognized.
    pub fn is_empty(&self) -> bool {
        TradeField::ALL.iter().all(|f| !self.is_set(*f))
    }

    /// Whether the trade closed with a positive pip result.
    pub fn is_profitable(&self) -> bool {
        self.profit_pips > Decimal::ZERO
    }

    /// Whether the trade closed with a negative pip result.
    pub fn is_losing(&self) -> bool {
        self.profit_pips < Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_type_parsing() {
        assert_eq!(OperationType::parse("BUY"), OperationType::Buy);
        assert_eq!(OperationType::parse(" sell "), OperationType::Sell);
        assert_eq!(OperationType::parse("unknown"), OperationType::Unknown);
        assert_eq!(OperationType::parse("hold"), OperationType::Unknown);
    }

    #[test]
    fn test_operation_type_serde_names() {
        assert_eq!(serde_json::to_string(&OperationType::Sell).unwrap(), "\"Sell\"");
        assert_eq!(
            serde_json::to_string(&OperationType::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = TradeRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.missing_fields().len(), TradeField::ALL.len());
    }

    #[test]
    fn test_missing_fields() {
        let record = TradeRecord {
            symbol: "EURUSD".to_string(),
            operation_type: OperationType::Buy,
            ..TradeRecord::default()
        };

        let missing = record.missing_fields();
        assert!(!missing.contains(&TradeField::Symbol));
        assert!(!missing.contains(&TradeField::OperationType));
        assert!(missing.contains(&TradeField::EntryPrice));
        assert!(!record.is_empty());
    }
}
