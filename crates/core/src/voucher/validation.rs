//! Double-entry validation run before a voucher is submitted.

use rust_decimal::Decimal;
use tracing::debug;

use super::error::VoucherError;
use super::types::{VoucherForm, VoucherTotals};

/// Checks a voucher form, stopping at the first failing rule.
///
/// Rules, in order:
/// 1. a voucher date is set
/// 2. a verifying user is selected
/// 3. there is at least one line
/// 4. there are at least two lines
/// 5. every line has a ledger selected
/// 6. total debit is positive
/// 7. total credit is positive
/// 8. total debit equals total credit
///
/// Amount text that does not read as a number counts as zero. Amounts whose
/// sum cannot be represented fail with `AmountOutOfRange` before rule 6.
///
/// # Errors
///
/// Returns the `VoucherError` of the first rule that fails.
pub fn validate_voucher(form: &VoucherForm) -> Result<VoucherTotals, VoucherError> {
    if form.voucher_date.is_none() {
        return Err(VoucherError::MissingDate);
    }

    if !form.approved_or_verified_by.is_some_and(|user| !user.is_unset()) {
        return Err(VoucherError::MissingVerifier);
    }

    if form.entries.is_empty() {
        return Err(VoucherError::NoEntries);
    }

    if form.entries.len() < 2 {
        return Err(VoucherError::InsufficientEntries);
    }

    if let Some(line) = form.entries.iter().position(|line| !line.has_ledger()) {
        return Err(VoucherError::LedgerNotSelected { line });
    }

    let totals = VoucherTotals::from_lines(&form.entries)?;

    if totals.debit <= Decimal::ZERO {
        return Err(VoucherError::MissingDebit);
    }

    if totals.credit <= Decimal::ZERO {
        return Err(VoucherError::MissingCredit);
    }

    if !totals.is_balanced() {
        return Err(VoucherError::unbalanced(totals.debit, totals.credit));
    }

    debug!(
        lines = form.entries.len(),
        amount = %totals.amount(),
        "voucher passed validation"
    );
    Ok(totals)
}
