//! Persistence module split across logical submodules. The [`PlayerStore`]
//! trait is the seam between the coordinator and SQLite so tests can
//! substitute an in-memory double without touching a real connection.

mod connection;
mod players;

use thiserror::Error;

pub use connection::{default_db_path, open, open_default, open_in_memory};
pub use players::SqliteStore;

use crate::models::{Player, PlayerChanges, SearchCriteria};

/// Distinct storage-error kind. Any fault from the underlying engine
/// (connectivity, constraint violation) surfaces as this type with the
/// original message preserved, never as a raw driver error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Build a storage error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The underlying engine's message, used when wrapping into domain errors.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Single-table persistence contract for roster entries.
///
/// `find` and `delete` share the same filter semantics: text criteria match
/// by substring, the birth date by exact equality, all present criteria
/// AND-combined, and an empty criteria set matches every row.
pub trait PlayerStore {
    /// Insert one row. No duplicate detection.
    fn add(&self, player: &Player) -> Result<(), StoreError>;

    /// Every row in storage order.
    fn all(&self) -> Result<Vec<Player>, StoreError>;

    /// Rows matching the AND-combined criteria; possibly empty.
    fn find(&self, criteria: &SearchCriteria) -> Result<Vec<Player>, StoreError>;

    /// Remove matching rows and return how many were removed. An empty
    /// criteria set removes every row.
    fn delete(&self, criteria: &SearchCriteria) -> Result<usize, StoreError>;

    /// A bounded slice of rows in storage order, independent of `count`.
    fn paginate(&self, offset: u64, limit: u64) -> Result<Vec<Player>, StoreError>;

    /// Total row count, ignoring all filters.
    fn count(&self) -> Result<u64, StoreError>;

    /// Overwrite the present `changes` fields on the row(s) matching every
    /// field of `original` exactly. Returns the number of rows touched; an
    /// empty change set is a no-op returning zero.
    fn replace(&self, original: &Player, changes: &PlayerChanges) -> Result<usize, StoreError>;

    /// Delete every row, returning how many were removed.
    fn clear(&self) -> Result<usize, StoreError>;
}
