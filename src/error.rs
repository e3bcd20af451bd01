//! Domain-level error taxonomy surfaced by the [`Coordinator`]. Low-level
//! storage and file-system faults never cross the coordinator boundary
//! unwrapped; they are re-signalled here with a human-readable message so the
//! presentation layer can render them directly.
//!
//! [`Coordinator`]: crate::coordinator::Coordinator

use thiserror::Error;

/// Errors a presentation-layer caller is expected to catch and display.
///
/// `NotFound` and `NothingDeleted` are expected outcomes of well-formed
/// queries, distinct from an empty list, so display logic can tell "search
/// ran and found nothing" apart from "search is still pending".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied data violated a precondition. Raised before any
    /// storage call is made.
    #[error("{0}")]
    Validation(String),

    /// A search matched zero rows.
    #[error("No players found with the given criteria.")]
    NotFound,

    /// A delete affected zero rows.
    #[error("No players found for deletion with the given criteria.")]
    NothingDeleted,

    /// The storage engine reported a fault; the original message is attached.
    #[error("Database error: {0}")]
    Persistence(String),

    /// Bulk import failed (parse error, missing field, bad date, or I/O).
    #[error("Import failed: {0}")]
    Import(String),

    /// Bulk export failed (I/O or serialization).
    #[error("Export failed: {0}")]
    Export(String),

    /// An in-place record update failed at the storage layer.
    #[error("Update failed: {0}")]
    Update(String),
}
