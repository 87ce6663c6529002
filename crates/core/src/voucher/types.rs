//! Voucher domain types.
//!
//! Field names on the wire follow the ERP API (`voucherDate`, `ledgerID`,
//! `approvedOrVerifiedBy`, ...).

use chrono::NaiveDate;
use hoffstee_shared::types::serde_helpers::{
    id_or_default, optional_date, optional_id, string_or_null,
};
use hoffstee_shared::types::{LedgerId, UserId, VoucherId, VoucherLineId, VoucherTypeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::VoucherError;
use super::input::AmountInput;
use crate::access::PageKey;

/// Voucher screens that share the double-entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    /// Money paid out.
    Payment,
    /// Money received.
    Receipt,
    /// General journal.
    Journal,
    /// Transfer between cash and bank.
    Contra,
    /// Debit/credit note.
    Note,
}

impl VoucherType {
    /// All voucher types, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Payment,
        Self::Receipt,
        Self::Journal,
        Self::Contra,
        Self::Note,
    ];

    /// Returns the backend voucher code used for numbering and listing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Payment => "VCH003",
            Self::Receipt => "VCH004",
            Self::Journal => "VCH005",
            Self::Contra => "VCH006",
            Self::Note => "VCH007",
        }
    }

    /// Looks a voucher type up by its backend code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Returns the page whose permissions gate this voucher type.
    #[must_use]
    pub const fn page(self) -> PageKey {
        match self {
            Self::Payment => PageKey::PaymentVoucher,
            Self::Receipt => PageKey::ReceiptVoucher,
            Self::Journal => PageKey::JournalVoucher,
            Self::Contra => PageKey::ContraVoucher,
            Self::Note => PageKey::NoteVoucher,
        }
    }

    /// Human-readable name used in notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Payment => "Payment Voucher",
            Self::Receipt => "Receipt Voucher",
            Self::Journal => "Journal Voucher",
            Self::Contra => "Contra Voucher",
            Self::Note => "Note Voucher",
        }
    }
}

/// Which submit control was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitAction {
    /// Store the voucher as a draft.
    Save,
    /// Post the voucher to the books.
    Post,
}

/// One debit/credit row of a voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherEntryLine {
    /// Line id; `0` for lines not yet stored.
    #[serde(default, deserialize_with = "id_or_default")]
    pub id: VoucherLineId,
    /// Selected ledger; `0` means none selected.
    #[serde(
        rename = "ledgerID",
        alias = "ledgerId",
        default,
        deserialize_with = "id_or_default"
    )]
    pub ledger_id: LedgerId,
    /// Debit amount text.
    #[serde(default)]
    pub debit_amount: AmountInput,
    /// Credit amount text.
    #[serde(default)]
    pub credit_amount: AmountInput,
    /// Free-text description of the line.
    #[serde(default, deserialize_with = "string_or_null")]
    pub line_narration: String,
}

impl VoucherEntryLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(ledger: i64, amount: &str) -> Self {
        Self {
            ledger_id: LedgerId(ledger),
            debit_amount: AmountInput::new(amount),
            ..Self::default()
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(ledger: i64, amount: &str) -> Self {
        Self {
            ledger_id: LedgerId(ledger),
            credit_amount: AmountInput::new(amount),
            ..Self::default()
        }
    }

    /// Returns true if a ledger has been chosen for this line.
    #[must_use]
    pub fn has_ledger(&self) -> bool {
        !self.ledger_id.is_unset()
    }
}

/// The voucher form: header fields plus entry lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherForm {
    /// Id of the voucher being edited; `None` for a new voucher.
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<VoucherId>,
    /// Backend voucher type id.
    #[serde(default, alias = "voucherTypeID", deserialize_with = "id_or_default")]
    pub voucher_type_id: VoucherTypeId,
    /// Voucher number issued by the backend.
    #[serde(default, deserialize_with = "string_or_null")]
    pub voucher_number: String,
    /// Voucher date.
    #[serde(default, deserialize_with = "optional_date")]
    pub voucher_date: Option<NaiveDate>,
    /// External reference (cheque number, invoice, ...).
    #[serde(default, deserialize_with = "string_or_null")]
    pub reference_no: String,
    /// Header narration.
    #[serde(default, deserialize_with = "string_or_null")]
    pub narration: String,
    /// User who verifies or approves the voucher.
    #[serde(default, deserialize_with = "optional_id")]
    pub approved_or_verified_by: Option<UserId>,
    /// Entry lines.
    #[serde(default)]
    pub entries: Vec<VoucherEntryLine>,
}

/// Debit and credit totals of a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoucherTotals {
    /// Sum of all debit amounts.
    pub debit: Decimal,
    /// Sum of all credit amounts.
    pub credit: Decimal,
}

impl VoucherTotals {
    /// Sums the amounts of `lines`. Text without a leading number counts as
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` with the first line whose amount, or the
    /// running total including it, does not fit a `Decimal`.
    pub fn from_lines(lines: &[VoucherEntryLine]) -> Result<Self, VoucherError> {
        let mut totals = Self {
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
        };

        for (line, entry) in lines.iter().enumerate() {
            let out_of_range = || VoucherError::AmountOutOfRange { line };
            let debit = entry.debit_amount.value().map_err(|_| out_of_range())?;
            let credit = entry.credit_amount.value().map_err(|_| out_of_range())?;

            totals.debit = totals.debit.checked_add(debit).ok_or_else(out_of_range)?;
            totals.credit = totals.credit.checked_add(credit).ok_or_else(out_of_range)?;
        }

        Ok(totals)
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }

    /// The voucher amount reported to the backend (total debit).
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.debit
    }
}

/// Body of a voucher create/update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherPayload {
    /// Every form field, unchanged.
    #[serde(flatten)]
    pub form: VoucherForm,
    /// Save was used.
    pub is_save: bool,
    /// Post was used.
    pub is_post: bool,
    /// Total debit.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl VoucherPayload {
    /// Builds the payload for a validated form.
    #[must_use]
    pub fn new(form: VoucherForm, action: SubmitAction, totals: &VoucherTotals) -> Self {
        Self {
            form,
            is_save: action == SubmitAction::Save,
            is_post: action == SubmitAction::Post,
            amount: totals.amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_voucher_type_codes() {
        assert_eq!(VoucherType::Receipt.code(), "VCH004");
        assert_eq!(VoucherType::from_code("VCH007"), Some(VoucherType::Note));
        assert_eq!(VoucherType::from_code("VCH001"), None);
        assert_eq!(VoucherType::Contra.page(), PageKey::ContraVoucher);
        assert_eq!(VoucherType::Payment.label(), "Payment Voucher");
    }

    #[test]
    fn test_totals_from_lines() {
        let lines = vec![
            VoucherEntryLine::debit(1, "60.25"),
            VoucherEntryLine::debit(2, "39.75"),
            VoucherEntryLine::credit(3, "100"),
            VoucherEntryLine::default(),
        ];

        let totals = VoucherTotals::from_lines(&lines).unwrap();

        assert_eq!(totals.debit, dec!(100));
        assert_eq!(totals.credit, dec!(100));
        assert!(totals.is_balanced());
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_sum_is_exact() {
        // 0.1 + 0.2 is exactly 0.3 with decimals.
        let lines = vec![
            VoucherEntryLine::debit(1, "0.1"),
            VoucherEntryLine::debit(1, "0.2"),
            VoucherEntryLine::credit(2, "0.3"),
        ];
        assert!(VoucherTotals::from_lines(&lines).unwrap().is_balanced());
    }

    #[test]
    fn test_totals_overflow_is_reported() {
        let lines = vec![
            VoucherEntryLine::debit(1, "70000000000000000000000000000"),
            VoucherEntryLine::debit(1, "70000000000000000000000000000"),
            VoucherEntryLine::credit(2, "1"),
        ];

        assert!(matches!(
            VoucherTotals::from_lines(&lines),
            Err(VoucherError::AmountOutOfRange { line: 1 })
        ));
    }

    #[test]
    fn test_unrepresentable_amount_is_reported() {
        let lines = vec![
            VoucherEntryLine::debit(1, "5"),
            VoucherEntryLine::credit(2, &"9".repeat(30)),
        ];

        assert!(matches!(
            VoucherTotals::from_lines(&lines),
            Err(VoucherError::AmountOutOfRange { line: 1 })
        ));
    }

    #[test]
    fn test_form_deserializes_api_shape() {
        let form: VoucherForm = serde_json::from_value(json!({
            "id": 12,
            "voucherTypeID": 4,
            "voucherNumber": "RV-0001",
            "voucherDate": "2024-05-01T00:00:00",
            "referenceNo": null,
            "narration": "Rent",
            "approvedOrVerifiedBy": "3",
            "entries": [
                {"id": 1, "ledgerID": 10, "debitAmount": 100, "creditAmount": 0, "lineNarration": null},
                {"id": 2, "ledgerID": 11, "debitAmount": "0", "creditAmount": "100", "lineNarration": "x"}
            ]
        }))
        .unwrap();

        assert_eq!(form.id, Some(VoucherId(12)));
        assert_eq!(form.voucher_type_id, VoucherTypeId(4));
        assert_eq!(form.voucher_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(form.reference_no, "");
        assert_eq!(form.approved_or_verified_by, Some(UserId(3)));
        assert_eq!(form.entries[0].ledger_id, LedgerId(10));
        assert_eq!(form.entries[0].debit_amount.value().unwrap(), dec!(100));
        assert_eq!(form.entries[1].credit_amount.value().unwrap(), dec!(100));
    }

    #[test]
    fn test_form_deserializes_blank_browser_state() {
        let form: VoucherForm = serde_json::from_value(json!({
            "id": null,
            "voucherDate": "",
            "approvedOrVerifiedBy": "",
            "entries": [{"id": 0, "ledgerID": 0, "debitAmount": 0, "creditAmount": 0, "lineNarration": ""}]
        }))
        .unwrap();

        assert_eq!(form.id, None);
        assert_eq!(form.voucher_date, None);
        assert_eq!(form.approved_or_verified_by, None);
        assert!(!form.entries[0].has_ledger());
    }

    #[test]
    fn test_payload_shape() {
        let form = VoucherForm {
            id: None,
            voucher_type_id: VoucherTypeId(4),
            voucher_number: "RV-0001".into(),
            voucher_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            reference_no: String::new(),
            narration: String::new(),
            approved_or_verified_by: Some(UserId(3)),
            entries: vec![
                VoucherEntryLine::debit(1, "100"),
                VoucherEntryLine::credit(2, "100"),
            ],
        };
        let totals = VoucherTotals::from_lines(&form.entries).unwrap();

        let payload = VoucherPayload::new(form, SubmitAction::Post, &totals);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["isSave"], false);
        assert_eq!(json["isPost"], true);
        assert_eq!(json["amount"], json!(100.0));
        assert_eq!(json["voucherNumber"], "RV-0001");
        assert_eq!(json["voucherDate"], "2024-05-01");
        assert_eq!(json["approvedOrVerifiedBy"], 3);
        assert_eq!(json["entries"][0]["ledgerID"], 1);
        assert_eq!(json["entries"][1]["creditAmount"], "100");
    }
}
