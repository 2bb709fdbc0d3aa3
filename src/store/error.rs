//! Store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// No record with the requested id.
    NotFound {
        /// Requested game id.
        id: String,
    },
    /// A lock was poisoned by a panicking writer.
    Poisoned,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error category.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// No game exists with `id`.
    #[track_caller]
    pub fn not_found(id: &str) -> Self {
        Self::new(
            StoreErrorKind::NotFound { id: id.to_string() },
            format!("No game exists with provided game_id {}", id),
        )
    }

    /// A lock guarding `what` was poisoned.
    #[track_caller]
    pub fn poisoned(what: &str) -> Self {
        Self::new(StoreErrorKind::Poisoned, format!("Lock on {} is poisoned", what))
    }
}
