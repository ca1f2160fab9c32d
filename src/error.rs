//! Error types for slotdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SlotError
pub type Result<T> = std::result::Result<T, SlotError>;

/// Unified error type for slotdb operations
#[derive(Debug, Error)]
pub enum SlotError {
    // -------------------------------------------------------------------------
    // Usage Errors
    // -------------------------------------------------------------------------
    #[error("Usage error: {0}")]
    Usage(String),

    // -------------------------------------------------------------------------
    // Slot Errors
    // -------------------------------------------------------------------------
    #[error("ID {id} is out of range (capacity {capacity})")]
    OutOfRange { id: usize, capacity: usize },

    #[error("ID {0} is not set")]
    NotFound(usize),

    #[error("ID {0} is already set, delete it first")]
    AlreadySet(usize),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A read ended before the declared number of bytes arrived
    #[error("Truncated file: {0}")]
    Truncated(String),

    #[error("Corrupt file: {0}")]
    Corrupt(String),

    // -------------------------------------------------------------------------
    // Memory Errors
    // -------------------------------------------------------------------------
    #[error("Memory error: {0}")]
    Allocation(String),
}

impl SlotError {
    /// True for the errors that mean the file itself could not be trusted or reached
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            SlotError::Io(_) | SlotError::Truncated(_) | SlotError::Corrupt(_)
        )
    }
}

impl From<std::collections::TryReserveError> for SlotError {
    fn from(e: std::collections::TryReserveError) -> Self {
        SlotError::Allocation(e.to_string())
    }
}
