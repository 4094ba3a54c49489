//! Journal reporting.

mod formatter;
mod stats;

pub use formatter::{NO_TRADES, ReportFormatter};
pub use stats::{GroupStats, TradeSummary, TradingReport, UserReport, UserSummary};
