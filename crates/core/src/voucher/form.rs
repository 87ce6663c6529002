//! Voucher form state operations.
//!
//! Mirrors what the voucher screen lets the user do between opening the form
//! and pressing Save/Post. Amount edits go through the sanitizer, so a form
//! only ever holds clean amount text unless it was loaded from the backend.

use hoffstee_shared::types::{LedgerId, VoucherTypeId};

use super::error::VoucherError;
use super::input::{AmountInput, handle_decimal_paste};
use super::types::{VoucherEntryLine, VoucherForm};

impl VoucherForm {
    /// Creates an empty form with one blank line.
    #[must_use]
    pub fn new(voucher_type_id: VoucherTypeId, voucher_number: impl Into<String>) -> Self {
        Self {
            id: None,
            voucher_type_id,
            voucher_number: voucher_number.into(),
            voucher_date: None,
            reference_no: String::new(),
            narration: String::new(),
            approved_or_verified_by: None,
            entries: vec![VoucherEntryLine::default()],
        }
    }

    /// Returns true if the form edits an existing voucher.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.id.is_some_and(|id| !id.is_unset())
    }

    /// Appends a blank line.
    pub fn add_line(&mut self) {
        self.entries.push(VoucherEntryLine::default());
    }

    /// Removes the line at `index`.
    ///
    /// # Errors
    ///
    /// - `LastLine` if it is the only line.
    /// - `NoSuchLine` if `index` is out of range.
    pub fn remove_line(&mut self, index: usize) -> Result<VoucherEntryLine, VoucherError> {
        if index >= self.entries.len() {
            return Err(VoucherError::NoSuchLine(index));
        }
        if self.entries.len() == 1 {
            return Err(VoucherError::LastLine);
        }
        Ok(self.entries.remove(index))
    }

    /// Selects the ledger of a line.
    pub fn set_ledger(&mut self, index: usize, ledger: LedgerId) -> Result<(), VoucherError> {
        self.line_mut(index)?.ledger_id = ledger;
        Ok(())
    }

    /// Sets a debit amount from typed text.
    pub fn set_debit(&mut self, index: usize, raw: &str) -> Result<(), VoucherError> {
        self.line_mut(index)?.debit_amount = AmountInput::sanitized(raw);
        Ok(())
    }

    /// Sets a credit amount from typed text.
    pub fn set_credit(&mut self, index: usize, raw: &str) -> Result<(), VoucherError> {
        self.line_mut(index)?.credit_amount = AmountInput::sanitized(raw);
        Ok(())
    }

    /// Replaces a debit amount with pasted clipboard text.
    pub fn paste_debit(&mut self, index: usize, clipboard: &str) -> Result<(), VoucherError> {
        self.line_mut(index)?.debit_amount = AmountInput::new(handle_decimal_paste(clipboard));
        Ok(())
    }

    /// Replaces a credit amount with pasted clipboard text.
    pub fn paste_credit(&mut self, index: usize, clipboard: &str) -> Result<(), VoucherError> {
        self.line_mut(index)?.credit_amount = AmountInput::new(handle_decimal_paste(clipboard));
        Ok(())
    }

    /// Sets the narration of a line.
    pub fn set_line_narration(
        &mut self,
        index: usize,
        narration: impl Into<String>,
    ) -> Result<(), VoucherError> {
        self.line_mut(index)?.line_narration = narration.into();
        Ok(())
    }

    /// Clears everything the user entered. Keeps the voucher type and number
    /// issued by the backend; drops the edited voucher id.
    pub fn reset(&mut self) {
        *self = Self::new(self.voucher_type_id, std::mem::take(&mut self.voucher_number));
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut VoucherEntryLine, VoucherError> {
        self.entries
            .get_mut(index)
            .ok_or(VoucherError::NoSuchLine(index))
    }
}
