//! Journal entry: one extracted trade plus the caller's metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::trade::TradeRecord;

/// Display name used when the caller does not provide one.
pub const UNKNOWN_USER: &str = "Unknown";

/// A trade record as stored in the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the transcript was processed.
    pub processed_at: DateTime<Utc>,

    /// Opaque user identifier supplied by the caller.
    pub user_id: String,

    /// Display name of the user.
    pub username: String,

    /// Extracted trade.
    pub record: TradeRecord,
}

impl JournalEntry {
    /// Create an entry stamped with the current time.
    pub fn new(user_id: impl Into<String>, username: Option<String>, record: TradeRecord) -> Self {
        Self::at(Utc::now(), user_id, username, record)
    }

    /// Create an entry with an explicit processing time.
    pub fn at(
        processed_at: DateTime<Utc>,
        user_id: impl Into<String>,
        username: Option<String>,
        record: TradeRecord,
    ) -> Self {
        let username = username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| UNKNOWN_USER.to_string());

        Self {
            processed_at,
            user_id: user_id.into(),
            username,
            record,
        }
    }
}
