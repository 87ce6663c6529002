//! Page permissions.
//!
//! The API returns one permission record per page for the signed-in user's
//! role. Buttons, table columns and submit paths are gated on it.

use hoffstee_shared::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Admin pages that carry their own permission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKey {
    /// Tax master.
    #[serde(rename = "taxmasters")]
    TaxMaster,
    /// Company profile.
    #[serde(rename = "company")]
    Company,
    /// Users.
    #[serde(rename = "users")]
    Users,
    /// User-to-role assignment.
    #[serde(rename = "userroles")]
    UserRoles,
    /// Role permission matrix.
    #[serde(rename = "userrolepermissions")]
    RolePermissions,
    /// Account groups.
    #[serde(rename = "accountgroups")]
    AccountGroups,
    /// General ledgers.
    #[serde(rename = "ledgers")]
    Ledgers,
    /// Voucher types.
    #[serde(rename = "vouchertypes")]
    VoucherTypes,
    /// Modules.
    #[serde(rename = "modules")]
    Modules,
    /// Sub-modules.
    #[serde(rename = "submodules")]
    SubModules,
    /// Pages.
    #[serde(rename = "pages")]
    Pages,
    /// Roles.
    #[serde(rename = "roles")]
    Roles,
    /// Transaction types.
    #[serde(rename = "transactiontype")]
    TransactionType,
    /// Payment vouchers.
    #[serde(rename = "payment")]
    PaymentVoucher,
    /// Receipt vouchers.
    #[serde(rename = "receipt")]
    ReceiptVoucher,
    /// Journal vouchers.
    #[serde(rename = "journal")]
    JournalVoucher,
    /// Contra vouchers.
    #[serde(rename = "contra")]
    ContraVoucher,
    /// Debit/credit note vouchers.
    #[serde(rename = "note")]
    NoteVoucher,
}

impl PageKey {
    /// Returns the key the permissions endpoint expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaxMaster => "taxmasters",
            Self::Company => "company",
            Self::Users => "users",
            Self::UserRoles => "userroles",
            Self::RolePermissions => "userrolepermissions",
            Self::AccountGroups => "accountgroups",
            Self::Ledgers => "ledgers",
            Self::VoucherTypes => "vouchertypes",
            Self::Modules => "modules",
            Self::SubModules => "submodules",
            Self::Pages => "pages",
            Self::Roles => "roles",
            Self::TransactionType => "transactiontype",
            Self::PaymentVoucher => "payment",
            Self::ReceiptVoucher => "receipt",
            Self::JournalVoucher => "journal",
            Self::ContraVoucher => "contra",
            Self::NoteVoucher => "note",
        }
    }
}

impl std::fmt::Display for PageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One action a permission record can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create records.
    Add,
    /// Change existing records.
    Edit,
    /// See the list.
    View,
    /// Delete records.
    Delete,
    /// Post vouchers to the books.
    Post,
}

impl Capability {
    /// Verb used in denial messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Add => "create",
            Self::Edit => "edit",
            Self::View => "view",
            Self::Delete => "delete",
            Self::Post => "post",
        }
    }
}

/// Denied capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("You don't have permission to {} pages", .0.verb())]
pub struct AccessError(pub Capability);

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        Self::Forbidden(err.to_string())
    }
}

/// Permission record for one page. Missing flags deny.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagePermissions {
    /// May create.
    pub is_add: bool,
    /// May edit.
    pub is_edit: bool,
    /// May view the list.
    pub is_view: bool,
    /// May delete.
    pub is_delete: bool,
    /// May post vouchers.
    pub is_post: bool,
}

impl PagePermissions {
    /// A record granting everything.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            is_add: true,
            is_edit: true,
            is_view: true,
            is_delete: true,
            is_post: true,
        }
    }

    /// Returns true if `capability` is granted.
    #[must_use]
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Add => self.is_add,
            Capability::Edit => self.is_edit,
            Capability::View => self.is_view,
            Capability::Delete => self.is_delete,
            Capability::Post => self.is_post,
        }
    }

    /// Fails with the user-facing denial if `capability` is not granted.
    pub fn require(&self, capability: Capability) -> Result<(), AccessError> {
        if self.allows(capability) {
            Ok(())
        } else {
            Err(AccessError(capability))
        }
    }

    /// The list table is rendered only for viewers.
    #[must_use]
    pub const fn shows_table(&self) -> bool {
        self.is_view
    }

    /// The per-row actions column exists if any row action is allowed.
    #[must_use]
    pub const fn shows_actions_column(&self) -> bool {
        self.is_edit || self.is_delete
    }
}
