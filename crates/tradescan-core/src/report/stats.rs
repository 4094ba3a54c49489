//! Aggregate statistics over journal entries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::journal::JournalEntry;
use crate::models::trade::TradeRecord;

/// Count, sum and mean of pip results for one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupStats {
    pub key: String,
    pub count: usize,
    pub total_pips: Decimal,
    pub average_pips: Decimal,
    /// Sum of traded volume, in lots.
    pub total_volume: Decimal,
}

impl GroupStats {
    fn add(&mut self, record: &TradeRecord) {
        self.count += 1;
        self.total_pips += record.profit_pips;
        self.total_volume += record.volume;
        self.average_pips = self.total_pips / Decimal::from(self.count);
    }
}

/// Group records by a key, ordered by key.
fn group_by<'a, F>(records: impl Iterator<Item = &'a TradeRecord>, key: F) -> Vec<GroupStats>
where
    F: Fn(&TradeRecord) -> String,
{
    let mut groups: BTreeMap<String, GroupStats> = BTreeMap::new();
    for record in records {
        let k = key(record);
        groups
            .entry(k.clone())
            .or_insert_with(|| GroupStats {
                key: k,
                ..GroupStats::default()
            })
            .add(record);
    }
    groups.into_values().collect()
}

fn percent_of(part: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(total)
}

/// Journal-wide trading report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingReport {
    pub total_trades: usize,
    pub profitable_trades: usize,
    pub losing_trades: usize,
    pub total_pips: Decimal,
    pub average_pips: Decimal,
    /// Share of profitable trades, in percent.
    pub efficiency_percent: Decimal,
    pub by_symbol: Vec<GroupStats>,
    pub by_operation: Vec<GroupStats>,
}

impl TradingReport {
    /// Build the report. Returns `None` for an empty journal.
    pub fn from_entries(entries: &[JournalEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let records = || entries.iter().map(|e| &e.record);
        let total_trades = entries.len();
        let total_pips: Decimal = records().map(|r| r.profit_pips).sum();
        let profitable_trades = records().filter(|r| r.is_profitable()).count();

        Some(Self {
            total_trades,
            profitable_trades,
            losing_trades: records().filter(|r| r.is_losing()).count(),
            total_pips,
            average_pips: total_pips / Decimal::from(total_trades),
            efficiency_percent: percent_of(profitable_trades, total_trades),
            by_symbol: group_by(records(), |r| r.symbol.clone()),
            by_operation: group_by(records(), |r| r.operation_type.to_string()),
        })
    }
}

/// Symbol and pip result of a single trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSummary {
    pub symbol: String,
    pub profit_pips: Decimal,
}

impl From<&TradeRecord> for TradeSummary {
    fn from(record: &TradeRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            profit_pips: record.profit_pips,
        }
    }
}

/// Trading report for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    pub user_id: String,
    pub total_trades: usize,
    pub profitable_trades: usize,
    /// Every trade that was not profitable, break-even included.
    pub unprofitable_trades: usize,
    pub total_pips: Decimal,
    pub average_pips: Decimal,
    pub efficiency_percent: Decimal,
    pub best_trade: TradeSummary,
    pub worst_trade: TradeSummary,
}

impl UserReport {
    /// Build the report for `user_id`. Returns `None` if the user has no trades.
    pub fn for_user(entries: &[JournalEntry], user_id: &str) -> Option<Self> {
        let records: Vec<&TradeRecord> = entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| &e.record)
            .collect();

        let first = *records.first()?;
        let total_trades = records.len();
        let profitable_trades = records.iter().filter(|r| r.is_profitable()).count();
        let total_pips: Decimal = records.iter().map(|r| r.profit_pips).sum();

        // Earliest trade wins ties, for both best and worst.
        let (mut best, mut worst) = (first, first);
        for &record in &records[1..] {
            if record.profit_pips > best.profit_pips {
                best = record;
            }
            if record.profit_pips < worst.profit_pips {
                worst = record;
            }
        }

        Some(Self {
            user_id: user_id.to_string(),
            total_trades,
            profitable_trades,
            unprofitable_trades: total_trades - profitable_trades,
            total_pips,
            average_pips: total_pips / Decimal::from(total_trades),
            efficiency_percent: percent_of(profitable_trades, total_trades),
            best_trade: best.into(),
            worst_trade: worst.into(),
        })
    }
}

/// Per-user totals, grouped by display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub trades: usize,
    pub best_pips: Decimal,
    pub worst_pips: Decimal,
    pub average_pips: Decimal,
}

impl UserSummary {
    /// One summary per display name, ordered by name.
    pub fn by_user(entries: &[JournalEntry]) -> Vec<Self> {
        let mut groups: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
        for entry in entries {
            groups
                .entry(entry.username.as_str())
                .or_default()
                .push(entry.record.profit_pips);
        }

        groups
            .into_iter()
            .map(|(username, pips)| {
                let total: Decimal = pips.iter().copied().sum();
                Self {
                    username: username.to_string(),
                    trades: pips.len(),
                    best_pips: pips.iter().copied().max().unwrap_or_default(),
                    worst_pips: pips.iter().copied().min().unwrap_or_default(),
                    average_pips: total / Decimal::from(pips.len()),
                }
            })
            .collect()
    }
}
