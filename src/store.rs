//! Persistence for batters and hit events.
//!
//! The workflow only talks to [`HitStore`]; [`SqliteStore`] is the backing
//! implementation used by the binary.

use chrono::NaiveDate;
use thiserror::Error;

use crate::hit_entry::HitEvent;

pub mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

/// Identity of an appended hit event row. Increases with insertion order.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
pub struct RowId(pub i64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(err, msg)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(msg.unwrap_or_else(|| err.to_string()))
            }
            rusqlite::Error::SqliteFailure(err, msg)
                if matches!(
                    err.code,
                    rusqlite::ErrorCode::CannotOpen
                        | rusqlite::ErrorCode::DatabaseBusy
                        | rusqlite::ErrorCode::DatabaseLocked
                        | rusqlite::ErrorCode::NotADatabase
                ) =>
            {
                Self::Connection(msg.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Sqlite(other),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Connection(e.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

pub trait HitStore {
    /// Appends one row. Every call creates a new row, duplicates included.
    fn append_hit_event(&self, event: &HitEvent) -> StorageResult<RowId>;

    /// All events for a batter on a date, in insertion order.
    fn list_hit_events(&self, batter: &str, game_date: NaiveDate) -> StorageResult<Vec<HitEvent>>;

    /// Known batter names, alphabetical.
    fn list_batter_names(&self) -> StorageResult<Vec<String>>;

    fn add_batter(&self, name: &str) -> StorageResult<()>;
}
