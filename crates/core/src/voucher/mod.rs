//! Voucher entry: form state, double-entry validation and submission.
//!
//! This module implements the logic behind the voucher screens
//! (Payment, Receipt, Journal, Contra, Note):
//! - Amount field sanitizing and lenient amount parsing
//! - Voucher form state (entry lines added, edited, removed)
//! - Fail-fast validation of double-entry rules before submission
//! - Building the submission payload and dispatching create/update
//!   through the [`VoucherGateway`] seam
//! - The voucher list: rows, lazily loaded entry lines, delete

pub mod error;
pub mod form;
pub mod input;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use error::{GatewayError, VoucherError};
pub use input::{AmountInput, AmountOutOfRange, allow_two_decimals, handle_decimal_paste};
pub use service::{
    Submission, SubmissionOutcome, VerifierOption, VoucherEntryRow, VoucherGateway,
    VoucherNumbering, VoucherService, VoucherSummary,
};
pub use types::{
    SubmitAction, VoucherEntryLine, VoucherForm, VoucherPayload, VoucherTotals, VoucherType,
};
pub use validation::validate_voucher;
