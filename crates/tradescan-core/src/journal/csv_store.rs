//! CSV file journal.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TradeJournal;
use crate::error::JournalError;
use crate::models::journal::JournalEntry;
use crate::models::trade::{OperationType, TradeRecord};

/// Processing time format of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One flat journal row.
#[derive(Debug, Serialize, Deserialize)]
struct JournalRow {
    date: String,
    user_id: String,
    username: String,
    symbol: String,
    operation_type: OperationType,
    volume: Decimal,
    entry_price: Decimal,
    exit_price: Decimal,
    profit_currency: Decimal,
    profit_pips: Decimal,
    profit_percent: Decimal,
    sl_price: Decimal,
    tp_price: Decimal,
    swap: Decimal,
    commission: Decimal,
    order_id: String,
    entry_time: String,
    exit_time: String,
}

impl JournalRow {
    const COLUMNS: [&'static str; 18] = [
        "date",
        "user_id",
        "username",
        "symbol",
        "operation_type",
        "volume",
        "entry_price",
        "exit_price",
        "profit_currency",
        "profit_pips",
        "profit_percent",
        "sl_price",
        "tp_price",
        "swap",
        "commission",
        "order_id",
        "entry_time",
        "exit_time",
    ];

    fn from_entry(entry: &JournalEntry) -> Self {
        let r = &entry.record;
        Self {
            date: entry.processed_at.format(DATE_FORMAT).to_string(),
            user_id: entry.user_id.clone(),
            username: entry.username.clone(),
            symbol: r.symbol.clone(),
            operation_type: r.operation_type,
            volume: r.volume,
            entry_price: r.entry_price,
            exit_price: r.exit_price,
            profit_currency: r.profit_currency,
            profit_pips: r.profit_pips,
            profit_percent: r.profit_percent,
            sl_price: r.sl_price,
            tp_price: r.tp_price,
            swap: r.swap,
            commission: r.commission,
            order_id: r.order_id.clone(),
            entry_time: r.entry_time.clone(),
            exit_time: r.exit_time.clone(),
        }
    }

    fn into_entry(self) -> Option<JournalEntry> {
        let processed_at = NaiveDateTime::parse_from_str(&self.date, DATE_FORMAT).ok()?;

        Some(JournalEntry {
            processed_at: Utc.from_utc_datetime(&processed_at),
            user_id: self.user_id,
            username: self.username,
            record: TradeRecord {
                symbol: self.symbol,
                operation_type: self.operation_type,
                volume: self.volume,
                entry_price: self.entry_price,
                exit_price: self.exit_price,
                profit_currency: self.profit_currency,
                profit_pips: self.profit_pips,
                profit_percent: self.profit_percent,
                sl_price: self.sl_price,
                tp_price: self.tp_price,
                swap: self.swap,
                commission: self.commission,
                order_id: self.order_id,
                entry_time: self.entry_time,
                exit_time: self.exit_time,
            },
        })
    }
}

/// Append-only journal stored as one CSV file.
///
/// Appends from several threads are serialized by an internal lock.
pub struct CsvJournal {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvJournal {
    /// Open a journal, creating the file and its header row if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source| JournalError::Open {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(open_err)?;
        }

        let is_new = std::fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        if is_new {
            let file = File::create(&path).map_err(open_err)?;
            let mut wtr = csv::Writer::from_writer(file);
            wtr.write_record(JournalRow::COLUMNS)
                .map_err(|e| JournalError::Append(e.to_string()))?;
            wtr.flush().map_err(open_err)?;
            debug!("Created journal at {}", path.display());
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Open a journal for reading only. Nothing is created on disk; a missing
    /// file reads as an empty journal.
    pub fn open_read_only(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TradeJournal for CsvJournal {
    fn append(&self, entry: &JournalEntry) -> Result<(), JournalError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| JournalError::Open {
                path: self.path.display().to_string(),
                source,
            })?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.serialize(JournalRow::from_entry(entry))
            .map_err(|e| JournalError::Append(e.to_string()))?;
        wtr.flush()
            .map_err(|e| JournalError::Append(e.to_string()))?;

        Ok(())
    }

    fn entries(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        match std::fs::metadata(&self.path) {
            Ok(meta) if meta.len() == 0 => return Ok(Vec::new()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            _ => {}
        }

        let mut rdr = csv::Reader::from_path(&self.path)?;

        let headers = rdr.headers()?.clone();
        if headers.iter().ne(JournalRow::COLUMNS.iter().copied()) {
            return Err(JournalError::Header(headers.iter().collect::<Vec<_>>().join(",")));
        }

        let mut entries = Vec::new();
        for (i, row) in rdr.deserialize::<JournalRow>().enumerate() {
            // Row 1 is the header
            let line = i + 2;
            match row.map(JournalRow::into_entry) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => warn!("Skipping journal row {}: bad date", line),
                Err(e) => warn!("Skipping journal row {}: {}", line, e),
            }
        }

        Ok(entries)
    }
}
