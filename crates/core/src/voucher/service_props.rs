//! Property-based tests for `VoucherService::prepare`.
//!
//! - Property 1: A valid form is accepted exactly when the required capabilities are granted
//! - Property 2: Validation failures win over permission failures
//! - Property 3: The payload carries the action flags and the debit total

use chrono::NaiveDate;
use hoffstee_shared::types::{UserId, VoucherId, VoucherTypeId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::VoucherError;
use super::service::{Submission, VoucherService};
use super::types::{SubmitAction, VoucherEntryLine, VoucherForm};
use crate::access::PagePermissions;

/// Strategy to generate positive amounts with two decimals (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn permissions_strategy() -> impl Strategy<Value = PagePermissions> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(is_add, is_edit, is_view, is_delete, is_post)| PagePermissions {
            is_add,
            is_edit,
            is_view,
            is_delete,
            is_post,
        },
    )
}

fn action_strategy() -> impl Strategy<Value = SubmitAction> {
    prop_oneof![Just(SubmitAction::Save), Just(SubmitAction::Post)]
}

/// Optional voucher id; `Some(0)` behaves like a new voucher.
fn editing_strategy() -> impl Strategy<Value = Option<VoucherId>> {
    prop_oneof![
        Just(None),
        Just(Some(VoucherId(0))),
        (1i64..10_000).prop_map(|id| Some(VoucherId(id))),
    ]
}

fn balanced_form(amount: Decimal, id: Option<VoucherId>) -> VoucherForm {
    let text = amount.to_string();
    let mut form = VoucherForm::new(VoucherTypeId(3), "PV-0001");
    form.id = id;
    form.voucher_date = NaiveDate::from_ymd_opt(2025, 3, 31);
    form.approved_or_verified_by = Some(UserId(1));
    form.entries = vec![
        VoucherEntryLine::debit(1, &text),
        VoucherEntryLine::credit(2, &text),
    ];
    form
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_accepted_iff_capabilities_granted(
        amount in positive_amount(),
        id in editing_strategy(),
        action in action_strategy(),
        perms in permissions_strategy(),
    ) {
        let editing = id.is_some_and(|id| !id.is_unset());
        let mut expected = if editing { perms.is_edit } else { perms.is_add };
        if action == SubmitAction::Post {
            expected = expected && perms.is_post;
        }

        let result = VoucherService::prepare(balanced_form(amount, id), action, &perms);

        prop_assert_eq!(result.is_ok(), expected);
        match result {
            Ok(Submission::Update { id: updated, .. }) => {
                prop_assert!(editing);
                prop_assert_eq!(Some(updated), id);
            }
            Ok(Submission::Create(_)) => prop_assert!(!editing),
            Err(err) => prop_assert!(matches!(err, VoucherError::Forbidden(_))),
        }
    }

    #[test]
    fn prop_validation_checked_before_permissions(
        amount in positive_amount(),
        id in editing_strategy(),
        action in action_strategy(),
    ) {
        let mut form = balanced_form(amount, id);
        form.voucher_date = None;

        let err = VoucherService::prepare(form, action, &PagePermissions::default()).unwrap_err();

        prop_assert!(matches!(err, VoucherError::MissingDate));
    }

    #[test]
    fn prop_payload_reflects_action_and_total(
        amount in positive_amount(),
        action in action_strategy(),
    ) {
        let submission = VoucherService::prepare(
            balanced_form(amount, None),
            action,
            &PagePermissions::all(),
        )
        .unwrap();
        let payload = submission.payload();

        prop_assert_eq!(payload.amount, amount);
        prop_assert_eq!(payload.is_save, action == SubmitAction::Save);
        prop_assert_eq!(payload.is_post, action == SubmitAction::Post);
        prop_assert!(payload.is_save != payload.is_post);
    }
}
