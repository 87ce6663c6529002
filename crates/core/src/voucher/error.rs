//! Voucher error types.
//!
//! Validation messages are shown to the user verbatim, so they read as
//! instructions rather than diagnostics.

use hoffstee_shared::AppError;
use hoffstee_shared::types::VoucherId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::access::AccessError;

/// Failures reported by the ERP API seam.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The API answered with an error message.
    #[error("{0}")]
    Rejected(String),

    /// The voucher does not exist.
    #[error("Voucher {0} not found")]
    NotFound(VoucherId),

    /// The request never got an answer.
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Errors that can occur while editing or submitting a voucher.
#[derive(Debug, Error)]
pub enum VoucherError {
    // ========== Validation Errors (checked in this order) ==========
    /// No voucher date.
    #[error("Please select a date")]
    MissingDate,

    /// No verifying user.
    #[error("Please select a verifier")]
    MissingVerifier,

    /// The voucher has no lines at all.
    #[error("Please add at least one ledger entry")]
    NoEntries,

    /// Double entry needs two legs.
    #[error("At least 2 ledger entries are required (Debit & Credit)")]
    InsufficientEntries,

    /// A line has no ledger selected.
    #[error("All ledger rows must have a valid ledger selected")]
    LedgerNotSelected {
        /// Zero-based index of the first offending line.
        line: usize,
    },

    /// An amount, or the running total including it, does not fit a `Decimal`.
    #[error("Amount on row {} is too large", .line + 1)]
    AmountOutOfRange {
        /// Zero-based index of the offending line.
        line: usize,
    },

    /// Total debit is not positive.
    #[error("Both Debit and Credit must have values")]
    MissingDebit,

    /// Total credit is not positive.
    #[error("Both Debit and Credit must have values")]
    MissingCredit,

    /// Debits and credits differ.
    #[error("Debit ({debit}) and Credit ({credit}) must be equal")]
    Unbalanced {
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
    },

    // ========== Permission Errors ==========
    /// The page permissions do not allow this submission.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    // ========== Form Errors ==========
    /// Line index outside the form.
    #[error("Entry line {0} does not exist")]
    NoSuchLine(usize),

    /// The form always keeps one line.
    #[error("A voucher must keep at least one entry line")]
    LastLine,

    // ========== Backend Errors ==========
    /// The ERP API call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Listing vouchers failed.
    #[error("Failed to load vouchers")]
    ListFailed(#[source] GatewayError),

    /// Loading the entry lines of a listed voucher failed.
    #[error("Failed to load voucher entries")]
    EntriesFailed(#[source] GatewayError),

    /// Deleting a voucher failed.
    #[error("Delete failed")]
    DeleteFailed(#[source] GatewayError),
}

impl VoucherError {
    /// Builds an `Unbalanced` error with totals formatted without trailing zeros.
    #[must_use]
    pub fn unbalanced(debit: Decimal, credit: Decimal) -> Self {
        Self::Unbalanced {
            debit: debit.normalize(),
            credit: credit.normalize(),
        }
    }

    /// Returns the error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDate => "MISSING_DATE",
            Self::MissingVerifier => "MISSING_VERIFIER",
            Self::NoEntries => "NO_ENTRIES",
            Self::InsufficientEntries => "INSUFFICIENT_ENTRIES",
            Self::LedgerNotSelected { .. } => "LEDGER_NOT_SELECTED",
            Self::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            Self::MissingDebit => "MISSING_DEBIT",
            Self::MissingCredit => "MISSING_CREDIT",
            Self::Unbalanced { .. } => "UNBALANCED_VOUCHER",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NoSuchLine(_) => "NO_SUCH_LINE",
            Self::LastLine => "LAST_LINE",
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::ListFailed(_) => "LIST_FAILED",
            Self::EntriesFailed(_) => "ENTRIES_FAILED",
            Self::DeleteFailed(_) => "DELETE_FAILED",
        }
    }

    /// Returns true for the double-entry validation rules.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingDate
                | Self::MissingVerifier
                | Self::NoEntries
                | Self::InsufficientEntries
                | Self::LedgerNotSelected { .. }
                | Self::AmountOutOfRange { .. }
                | Self::MissingDebit
                | Self::MissingCredit
                | Self::Unbalanced { .. }
        )
    }
}

impl From<VoucherError> for AppError {
    fn from(err: VoucherError) -> Self {
        match err {
            VoucherError::Forbidden(denied) => denied.into(),
            VoucherError::Gateway(GatewayError::NotFound(id)) => {
                Self::NotFound(format!("voucher {id}"))
            }
            VoucherError::Gateway(other) => Self::ExternalService(other.to_string()),
            failed @ (VoucherError::ListFailed(_)
            | VoucherError::EntriesFailed(_)
            | VoucherError::DeleteFailed(_)) => Self::ExternalService(failed.to_string()),
            other => Self::Validation(other.to_string()),
        }
    }
}
