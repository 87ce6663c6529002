//! Voucher submission service.
//!
//! Validation and permission checks are pure; backend reads and writes
//! (numbering, lookup, listing, create/update/delete) go through
//! [`VoucherGateway`].

use async_trait::async_trait;
use chrono::NaiveDate;
use hoffstee_shared::types::serde_helpers::{id_or_default, optional_date, string_or_null};
use hoffstee_shared::types::{UserId, VoucherId, VoucherLineId, VoucherTypeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{GatewayError, VoucherError};
use super::input::AmountInput;
use super::types::{SubmitAction, VoucherForm, VoucherPayload, VoucherType};
use super::validation::validate_voucher;
use crate::access::{Capability, PageKey, PagePermissions};

/// A user who can be picked as verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifierOption {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

/// Next voucher number issued for a voucher type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherNumbering {
    /// Voucher number to show on the new form.
    pub voucher_code: String,
    /// Backend id of the voucher type.
    #[serde(alias = "voucherTypeID")]
    pub voucher_type_id: VoucherTypeId,
    /// Users that may verify the voucher.
    #[serde(default)]
    pub users: Vec<VerifierOption>,
}

/// One row of a voucher list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherSummary {
    /// Voucher id.
    pub id: VoucherId,
    /// Voucher number.
    #[serde(default, deserialize_with = "string_or_null")]
    pub voucher_number: String,
    /// Voucher date.
    #[serde(default, deserialize_with = "optional_date")]
    pub voucher_date: Option<NaiveDate>,
    /// Total debit.
    #[serde(default)]
    pub amount: Decimal,
    /// Name of the verifying user, if any.
    #[serde(default)]
    pub approved_or_verified_by_name: Option<String>,
}

impl VoucherSummary {
    /// Verifier column text; `-` when nobody verified the voucher.
    #[must_use]
    pub fn verifier_label(&self) -> &str {
        self.approved_or_verified_by_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("-")
    }
}

/// One entry line as shown under an expanded list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherEntryRow {
    /// Line id.
    #[serde(default, deserialize_with = "id_or_default")]
    pub id: VoucherLineId,
    /// Ledger display name.
    #[serde(default, deserialize_with = "string_or_null")]
    pub ledger_name: String,
    /// Debit amount text.
    #[serde(default)]
    pub debit_amount: AmountInput,
    /// Credit amount text.
    #[serde(default)]
    pub credit_amount: AmountInput,
    /// Line narration.
    #[serde(default, deserialize_with = "string_or_null")]
    pub line_narration: String,
}

/// Backend calls needed by the voucher screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoucherGateway: Send + Sync {
    /// Stores a new voucher and returns its id.
    async fn create_voucher(&self, payload: &VoucherPayload) -> Result<VoucherId, GatewayError>;

    /// Replaces an existing voucher.
    async fn update_voucher(
        &self,
        id: VoucherId,
        payload: &VoucherPayload,
    ) -> Result<(), GatewayError>;

    /// Loads a stored voucher.
    async fn fetch_voucher(&self, id: VoucherId) -> Result<VoucherForm, GatewayError>;

    /// Issues the next voucher number for a voucher type.
    async fn next_voucher_number(
        &self,
        voucher_type: VoucherType,
    ) -> Result<VoucherNumbering, GatewayError>;

    /// Lists stored vouchers of one type.
    async fn list_vouchers(
        &self,
        voucher_type: VoucherType,
    ) -> Result<Vec<VoucherSummary>, GatewayError>;

    /// Loads the entry lines of one voucher.
    async fn fetch_entries(&self, id: VoucherId) -> Result<Vec<VoucherEntryRow>, GatewayError>;

    /// Deletes a voucher.
    async fn delete_voucher(&self, id: VoucherId) -> Result<(), GatewayError>;

    /// Loads the signed-in user's permission record for a page.
    async fn page_permissions(&self, page: PageKey) -> Result<PagePermissions, GatewayError>;
}

/// A checked voucher ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// New voucher.
    Create(VoucherPayload),
    /// Edit of an existing voucher.
    Update {
        /// Voucher being edited.
        id: VoucherId,
        /// New contents.
        payload: VoucherPayload,
    },
}

impl Submission {
    /// Returns the payload to send.
    #[must_use]
    pub const fn payload(&self) -> &VoucherPayload {
        match self {
            Self::Create(payload) | Self::Update { payload, .. } => payload,
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The voucher was stored under a new id.
    Created(VoucherId),
    /// The voucher was updated.
    Updated(VoucherId),
}

impl SubmissionOutcome {
    /// Returns the stored voucher's id.
    #[must_use]
    pub const fn id(self) -> VoucherId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }

    /// Success notice shown to the user.
    #[must_use]
    pub fn message(self, voucher_type: VoucherType) -> String {
        match self {
            Self::Created(_) => format!("{} created successfully", voucher_type.label()),
            Self::Updated(_) => format!("{} updated successfully", voucher_type.label()),
        }
    }
}

/// Stateless service behind the voucher screens.
pub struct VoucherService;

impl VoucherService {
    /// Validates a form and checks the page permissions for `action`.
    ///
    /// A form whose `id` is set and non-zero is an update; otherwise a create.
    /// Updates need `Edit`, creates need `Add`, and posting additionally needs
    /// `Post`. Validation runs first, so a broken form reports its validation
    /// error even to a user without permissions.
    ///
    /// # Errors
    ///
    /// - The first failing validation rule.
    /// - `VoucherError::Forbidden` if a required capability is missing.
    pub fn prepare(
        form: VoucherForm,
        action: SubmitAction,
        permissions: &PagePermissions,
    ) -> Result<Submission, VoucherError> {
        let totals = validate_voucher(&form)?;

        let editing = form.id.filter(|id| !id.is_unset());
        if editing.is_some() {
            permissions.require(Capability::Edit)?;
        } else {
            permissions.require(Capability::Add)?;
        }
        if action == SubmitAction::Post {
            permissions.require(Capability::Post)?;
        }

        let payload = VoucherPayload::new(form, action, &totals);
        Ok(match editing {
            Some(id) => Submission::Update { id, payload },
            None => Submission::Create(payload),
        })
    }

    /// Validates, checks permissions and sends the voucher.
    ///
    /// # Errors
    ///
    /// Everything [`prepare`](Self::prepare) reports, plus
    /// `VoucherError::Gateway` if the backend call fails.
    pub async fn submit<G>(
        gateway: &G,
        voucher_type: VoucherType,
        form: VoucherForm,
        action: SubmitAction,
        permissions: &PagePermissions,
    ) -> Result<SubmissionOutcome, VoucherError>
    where
        G: VoucherGateway + ?Sized,
    {
        let submission = match Self::prepare(form, action, permissions) {
            Ok(submission) => submission,
            Err(err) => {
                warn!(
                    voucher_type = voucher_type.code(),
                    code = err.error_code(),
                    "voucher rejected: {err}"
                );
                return Err(err);
            }
        };

        let outcome = match submission {
            Submission::Create(payload) => {
                SubmissionOutcome::Created(gateway.create_voucher(&payload).await?)
            }
            Submission::Update { id, payload } => {
                gateway.update_voucher(id, &payload).await?;
                SubmissionOutcome::Updated(id)
            }
        };

        info!(
            voucher_type = voucher_type.code(),
            voucher_id = %outcome.id(),
            ?action,
            "{}",
            outcome.message(voucher_type)
        );
        Ok(outcome)
    }

    /// Loads a stored voucher into a form for editing.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::Gateway` if the voucher cannot be loaded.
    pub async fn load_for_edit<G>(gateway: &G, id: VoucherId) -> Result<VoucherForm, VoucherError>
    where
        G: VoucherGateway + ?Sized,
    {
        let mut form = gateway.fetch_voucher(id).await?;
        form.id = Some(id);
        if form.entries.is_empty() {
            form.add_line();
        }
        Ok(form)
    }

    /// Opens a blank form numbered by the backend, with the verifier choices.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::Gateway` if numbering fails.
    pub async fn new_form<G>(
        gateway: &G,
        voucher_type: VoucherType,
    ) -> Result<(VoucherForm, Vec<VerifierOption>), VoucherError>
    where
        G: VoucherGateway + ?Sized,
    {
        let numbering = gateway.next_voucher_number(voucher_type).await?;
        let form = VoucherForm::new(numbering.voucher_type_id, numbering.voucher_code);
        Ok((form, numbering.users))
    }

    /// Loads the permission record of the voucher type's page.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::Gateway` if the record cannot be loaded.
    pub async fn permissions<G>(
        gateway: &G,
        voucher_type: VoucherType,
    ) -> Result<PagePermissions, VoucherError>
    where
        G: VoucherGateway + ?Sized,
    {
        Ok(gateway.page_permissions(voucher_type.page()).await?)
    }

    /// Lists vouchers of one type. Needs `View`.
    ///
    /// # Errors
    ///
    /// - `VoucherError::Forbidden` without `View`.
    /// - `VoucherError::ListFailed` if the backend call fails.
    pub async fn list<G>(
        gateway: &G,
        voucher_type: VoucherType,
        permissions: &PagePermissions,
    ) -> Result<Vec<VoucherSummary>, VoucherError>
    where
        G: VoucherGateway + ?Sized,
    {
        permissions.require(Capability::View)?;
        gateway
            .list_vouchers(voucher_type)
            .await
            .map_err(VoucherError::ListFailed)
    }

    /// Loads the entry lines shown under an expanded list row.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::EntriesFailed` if the backend call fails.
    pub async fn entries<G>(
        gateway: &G,
        id: VoucherId,
    ) -> Result<Vec<VoucherEntryRow>, VoucherError>
    where
        G: VoucherGateway + ?Sized,
    {
        gateway
            .fetch_entries(id)
            .await
            .map_err(VoucherError::EntriesFailed)
    }

    /// Deletes a voucher and returns the success notice. Needs `Delete`.
    ///
    /// # Errors
    ///
    /// - `VoucherError::Forbidden` without `Delete`.
    /// - `VoucherError::DeleteFailed` if the backend call fails.
    pub async fn delete<G>(
        gateway: &G,
        voucher_type: VoucherType,
        id: VoucherId,
        permissions: &PagePermissions,
    ) -> Result<String, VoucherError>
    where
        G: VoucherGateway + ?Sized,
    {
        permissions.require(Capability::Delete)?;

        if let Err(err) = gateway.delete_voucher(id).await {
            warn!(
                voucher_type = voucher_type.code(),
                voucher_id = %id,
                "voucher delete failed: {err}"
            );
            return Err(VoucherError::DeleteFailed(err));
        }

        let message = format!("{} deleted!", voucher_type.label());
        info!(voucher_type = voucher_type.code(), voucher_id = %id, "{message}");
        Ok(message)
    }
}
