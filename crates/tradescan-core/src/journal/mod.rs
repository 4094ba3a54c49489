//! Append-only trade journal.

mod csv_store;

pub use csv_store::{CsvJournal, DATE_FORMAT};

use std::sync::Mutex;

use crate::error::JournalError;
use crate::models::journal::JournalEntry;

/// Trait for trade journal stores.
///
/// Rows are only ever appended and are read back in insertion order.
pub trait TradeJournal: Send + Sync {
    /// Append one entry.
    fn append(&self, entry: &JournalEntry) -> Result<(), JournalError>;

    /// All entries, oldest first.
    fn entries(&self) -> Result<Vec<JournalEntry>, JournalError>;
}

/// In-memory journal, handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    entries: Mutex<Vec<JournalEntry>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TradeJournal for MemoryJournal {
    fn append(&self, entry: &JournalEntry) -> Result<(), JournalError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}
