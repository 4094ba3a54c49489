//! Core library for trade screenshot transcripts.
//!
//! This crate provides:
//! - Trade record extraction from OCR transcripts (symbol, side, prices, profit)
//! - Derived pip and percent profit calculation
//! - An append-only CSV trade journal
//! - Aggregate trading statistics over the journal

pub mod error;
pub mod models;
pub mod extract;
pub mod journal;
pub mod report;

pub use error::{JournalError, Result, TradescanError};
pub use models::trade::{OperationType, TradeRecord};
pub use models::journal::JournalEntry;
pub use models::config::TradescanConfig;
pub use extract::{ExtractionReport, TradeRecordExtractor};
pub use extract::rules::ProfitFallback;
pub use journal::{CsvJournal, MemoryJournal, TradeJournal};
pub use report::{ReportFormatter, TradingReport, UserReport, UserSummary};
