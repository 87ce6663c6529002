//! Property-based tests for voucher validation.
//!
//! - Property 1: Balanced vouchers with selected ledgers pass
//! - Property 2: Any debit/credit mismatch is rejected with both totals
//! - Property 3: Fewer than two lines never pass
//! - Property 4: An unselected ledger on any line is rejected
//! - Property 5: Sanitized amount text reads back as the amount it displays

use chrono::NaiveDate;
use hoffstee_shared::types::{LedgerId, UserId, VoucherTypeId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::VoucherError;
use super::input::{AmountInput, allow_two_decimals};
use super::types::{VoucherEntryLine, VoucherForm};
use super::validation::validate_voucher;

/// Strategy to generate positive amounts with two decimals (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Splits `total` into `parts` positive cent amounts that sum exactly to it.
fn split(total: Decimal, parts: usize) -> Vec<Decimal> {
    let cents = (total * Decimal::ONE_HUNDRED).trunc();
    let count = Decimal::from(parts);
    let share = (cents / count).trunc();
    let mut amounts = vec![share / Decimal::ONE_HUNDRED; parts];
    let remainder = cents - share * count;
    amounts[0] += remainder / Decimal::ONE_HUNDRED;
    amounts
}

fn form_with(entries: Vec<VoucherEntryLine>) -> VoucherForm {
    let mut form = VoucherForm::new(VoucherTypeId(5), "JV-0001");
    form.voucher_date = NaiveDate::from_ymd_opt(2025, 1, 15);
    form.approved_or_verified_by = Some(UserId(9));
    form.entries = entries;
    form
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_balanced_voucher_passes(
        cents in 4i64..1_000_000,
        debit_lines in 1usize..4,
        credit_lines in 1usize..4,
    ) {
        let total = Decimal::new(cents, 2);
        let mut entries: Vec<_> = split(total, debit_lines)
            .into_iter()
            .map(|amount| VoucherEntryLine::debit(1, &amount.to_string()))
            .collect();
        entries.extend(
            split(total, credit_lines)
                .into_iter()
                .map(|amount| VoucherEntryLine::credit(2, &amount.to_string())),
        );

        let totals = validate_voucher(&form_with(entries)).unwrap();

        prop_assert_eq!(totals.debit, total);
        prop_assert_eq!(totals.credit, total);
    }

    #[test]
    fn prop_mismatch_is_rejected(debit in positive_amount(), credit in positive_amount()) {
        prop_assume!(debit != credit);

        let form = form_with(vec![
            VoucherEntryLine::debit(1, &debit.to_string()),
            VoucherEntryLine::credit(2, &credit.to_string()),
        ]);
        let err = validate_voucher(&form).unwrap_err();

        let expected = format!(
            "Debit ({}) and Credit ({}) must be equal",
            debit.normalize(),
            credit.normalize()
        );
        prop_assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn prop_fewer_than_two_lines_fail(debit in positive_amount(), credit in positive_amount()) {
        let single = form_with(vec![VoucherEntryLine {
            ledger_id: LedgerId(1),
            debit_amount: AmountInput::from_decimal(debit),
            credit_amount: AmountInput::from_decimal(credit),
            ..VoucherEntryLine::default()
        }]);

        prop_assert!(matches!(
            validate_voucher(&single),
            Err(VoucherError::InsufficientEntries)
        ));
        prop_assert!(matches!(
            validate_voucher(&form_with(Vec::new())),
            Err(VoucherError::NoEntries)
        ));
    }

    #[test]
    fn prop_unselected_ledger_fails(
        amount in positive_amount(),
        lines in 2usize..6,
        blank in any::<prop::sample::Index>(),
    ) {
        let text = amount.to_string();
        let mut entries = vec![VoucherEntryLine::debit(1, &text)];
        entries.extend((1..lines).map(|_| VoucherEntryLine::credit(2, "0")));
        entries[1].credit_amount = AmountInput::new(text);

        let line = blank.index(lines);
        entries[line].ledger_id = LedgerId(0);

        prop_assert!(matches!(
            validate_voucher(&form_with(entries)),
            Err(VoucherError::LedgerNotSelected { line: l }) if l == line
        ), "expected LedgerNotSelected for line {}", line);
    }

    #[test]
    fn prop_sanitized_text_reads_back(raw in "[0-9a-z.,]{0,12}") {
        let clean = allow_two_decimals(&raw);

        prop_assert!(clean.chars().all(|c| c.is_ascii_digit() || c == '.'));
        prop_assert!(clean.matches('.').count() <= 1);
        if let Some((_, fraction)) = clean.split_once('.') {
            prop_assert!(fraction.len() <= 2);
        }
        prop_assert!(AmountInput::new(clean).value().unwrap() >= Decimal::ZERO);
    }
}
