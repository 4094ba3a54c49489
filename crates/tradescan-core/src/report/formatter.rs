//! Plain-text rendering of trading reports.

use std::fmt::Write;

use super::stats::{GroupStats, TradingReport, UserReport, UserSummary};

const RULE: &str = "───────────────────────────────────────────────\n";

/// Message shown when the journal has no trades.
pub const NO_TRADES: &str = "No trades recorded yet.";

pub struct ReportFormatter;

impl ReportFormatter {
    /// Render the journal-wide report, or a notice when there is nothing to report.
    pub fn trading(report: Option<&TradingReport>) -> String {
        let Some(report) = report else {
            return NO_TRADES.to_string();
        };

        let mut out = String::new();
        out.push_str("TRADING REPORT\n");
        out.push_str(RULE);
        let _ = writeln!(out, "Total trades:      {}", report.total_trades);
        let _ = writeln!(out, "Profitable:        {}", report.profitable_trades);
        let _ = writeln!(out, "Losing:            {}", report.losing_trades);
        let _ = writeln!(out, "Total profit:      {:.1} pips", report.total_pips);
        let _ = writeln!(out, "Average profit:    {:.1} pips", report.average_pips);
        let _ = writeln!(out, "Efficiency:        {:.1}%", report.efficiency_percent);
        out.push('\n');

        out.push_str("BY SYMBOL\n");
        out.push_str(RULE);
        for group in &report.by_symbol {
            Self::group(&mut out, group, true);
        }
        out.push('\n');

        out.push_str("BY OPERATION\n");
        out.push_str(RULE);
        for group in &report.by_operation {
            Self::group(&mut out, group, false);
        }

        out
    }

    /// Render one user's report.
    pub fn user(report: Option<&UserReport>) -> String {
        let Some(report) = report else {
            return "No trades found for this user.".to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "TRADING STATISTICS FOR USER {}", report.user_id);
        out.push_str(RULE);
        let _ = writeln!(out, "Total trades:      {}", report.total_trades);
        let _ = writeln!(out, "Profitable:        {}", report.profitable_trades);
        let _ = writeln!(out, "Not profitable:    {}", report.unprofitable_trades);
        let _ = writeln!(out, "Total profit:      {:.1} pips", report.total_pips);
        let _ = writeln!(out, "Average profit:    {:.1} pips", report.average_pips);
        let _ = writeln!(out, "Efficiency:        {:.1}%", report.efficiency_percent);
        out.push('\n');
        let _ = writeln!(
            out,
            "Best trade:        {} {:.1} pips",
            display_symbol(&report.best_trade.symbol),
            report.best_trade.profit_pips
        );
        let _ = writeln!(
            out,
            "Worst trade:       {} {:.1} pips",
            display_symbol(&report.worst_trade.symbol),
            report.worst_trade.profit_pips
        );

        out
    }

    /// Render per-user totals.
    pub fn users(summaries: &[UserSummary]) -> String {
        if summaries.is_empty() {
            return NO_TRADES.to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "USERS ({})", summaries.len());
        out.push_str(RULE);
        for s in summaries {
            let _ = writeln!(out, "{}:", s.username);
            let _ = writeln!(out, "  Best:     {:.1} pips", s.best_pips);
            let _ = writeln!(out, "  Worst:    {:.1} pips", s.worst_pips);
            let _ = writeln!(out, "  Average:  {:.1} pips", s.average_pips);
            let _ = writeln!(out, "  Trades:   {}", s.trades);
        }

        out
    }

    fn group(out: &mut String, group: &GroupStats, with_volume: bool) {
        let _ = writeln!(out, "{}:", display_symbol(&group.key));
        let _ = writeln!(out, "  Trades:          {}", group.count);
        let _ = writeln!(out, "  Total profit:    {:.1} pips", group.total_pips);
        let _ = writeln!(out, "  Average profit:  {:.1} pips", group.average_pips);
        if with_volume {
            let _ = writeln!(out, "  Total volume:    {} lots", group.total_volume);
        }
    }
}

fn display_symbol(symbol: &str) -> &str {
    if symbol.is_empty() { "(unknown)" } else { symbol }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::journal::JournalEntry;
    use crate::models::trade::{OperationType, TradeRecord};
    use rust_decimal::Decimal;

    fn entries() -> Vec<JournalEntry> {
        vec![
            JournalEntry::new(
                "7",
                Some("alice".to_string()),
                TradeRecord {
                    symbol: "EURUSD".to_string(),
                    operation_type: OperationType::Buy,
                    profit_pips: Decimal::from(12),
                    volume: Decimal::from(2),
                    ..TradeRecord::default()
                },
            ),
            JournalEntry::new("7", Some("alice".to_string()), TradeRecord::default()),
        ]
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(ReportFormatter::trading(None), NO_TRADES);
        assert_eq!(ReportFormatter::users(&[]), NO_TRADES);
    }

    #[test]
    fn test_trading_report_text() {
        let report = TradingReport::from_entries(&entries());
        let text = ReportFormatter::trading(report.as_ref());

        assert!(text.contains("Total trades:      2"));
        assert!(text.contains("Efficiency:        50.0%"));
        assert!(text.contains("EURUSD:"));
        assert!(text.contains("(unknown):"));
        assert!(text.contains("Total volume:    2 lots"));
    }

    #[test]
    fn test_user_report_text() {
        let report = UserReport::for_user(&entries(), "7");
        let text = ReportFormatter::user(report.as_ref());

        assert!(text.contains("USER 7"));
        assert!(text.contains("Best trade:        EURUSD 12.0 pips"));
        assert!(text.contains("Worst trade:       (unknown) 0.0 pips"));
    }

    #[test]
    fn test_users_text() {
        let text = ReportFormatter::users(&UserSummary::by_user(&entries()));
        assert!(text.contains("alice:"));
        assert!(text.contains("Trades:   2"));
    }
}
