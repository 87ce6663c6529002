//! Hierarchy error types.

use hoffstee_shared::AppError;
use hoffstee_shared::types::LedgerId;
use thiserror::Error;

/// Errors that can occur while building a ledger hierarchy.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Two records share the same id.
    #[error("Ledger {0} appears more than once")]
    DuplicateLedger(LedgerId),

    /// A parent chain loops back on itself.
    #[error("Ledger hierarchy is cyclic at ledger {0}")]
    Cycle(LedgerId),

    /// A source record could not be read as a ledger.
    #[error("Record {index} is not a valid ledger: {reason}")]
    InvalidRecord {
        /// Position of the record in the input.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl HierarchyError {
    /// Returns the error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateLedger(_) => "DUPLICATE_LEDGER",
            Self::Cycle(_) => "CYCLIC_HIERARCHY",
            Self::InvalidRecord { .. } => "INVALID_LEDGER_RECORD",
        }
    }
}

impl From<HierarchyError> for AppError {
    fn from(err: HierarchyError) -> Self {
        Self::DataIntegrity(err.to_string())
    }
}
