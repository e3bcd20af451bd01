//! Core library surface for the roster manager.
//!
//! The public modules exposed here provide an intentionally small API: a
//! [`db::PlayerStore`] persistence seam with its SQLite implementation, the
//! XML interchange routines, and the [`Coordinator`] that ties them together
//! behind validation, domain-level errors, and change notifications.

pub mod coordinator;
pub mod db;
pub mod error;
pub mod models;
pub mod xml;

/// Convenience re-exports for the persistence layer. These are typically used
/// by `main.rs` to initialize the embedded SQLite store.
pub use db::{open, open_default, open_in_memory, PlayerStore, SqliteStore, StoreError};

/// The domain types other layers manipulate.
pub use models::{Player, PlayerChanges, SearchCriteria};

/// The orchestration entry point, its notifications, and the error taxonomy
/// presentation-layer callers are expected to handle.
pub use coordinator::{Coordinator, Notification};
pub use error::Error;
