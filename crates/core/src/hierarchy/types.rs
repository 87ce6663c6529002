//! Ledger hierarchy types.

use hoffstee_shared::types::LedgerId;
use hoffstee_shared::types::serde_helpers::optional_id;
use serde::{Deserialize, Serialize};

/// One ledger account as needed for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerNode {
    /// Unique ledger id.
    pub id: LedgerId,
    /// Display label.
    pub name: String,
    /// Parent ledger. `None` and `Some(0)` both mean "root".
    #[serde(default, deserialize_with = "optional_id")]
    pub parent_id: Option<LedgerId>,
}

impl LedgerNode {
    /// Creates a root ledger.
    #[must_use]
    pub fn root(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: LedgerId(id),
            name: name.into(),
            parent_id: None,
        }
    }

    /// Creates a ledger under `parent`.
    #[must_use]
    pub fn child(id: i64, name: impl Into<String>, parent: i64) -> Self {
        Self {
            id: LedgerId(id),
            name: name.into(),
            parent_id: Some(LedgerId(parent)),
        }
    }

    /// Returns the effective parent, treating the `0` sentinel as none.
    #[must_use]
    pub fn parent(&self) -> Option<LedgerId> {
        self.parent_id.filter(|p| !p.is_unset())
    }
}

/// A ledger placed in the flattened hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyEntry {
    /// Ledger id.
    pub id: LedgerId,
    /// Original display label.
    pub name: String,
    /// Parent ledger as given in the input.
    pub parent_id: Option<LedgerId>,
    /// Distance from the root (roots are 0).
    pub depth: usize,
    /// `name` prefixed with the indent marker once per depth level.
    pub display_name: String,
}
