//! Ledger hierarchy flattening.
//!
//! Turns a flat list of ledgers with optional parent references into the
//! pre-ordered, indentation-prefixed list a single `<select>` renders:
//!
//! ```text
//! Assets
//! ---Cash
//! ------Petty Cash
//! Liabilities
//! ```

pub mod convert;
pub mod error;
pub mod flatten;
pub mod types;

#[cfg(test)]
mod flatten_props;

pub use convert::{convert_for_hierarchy, flatten_records};
pub use error::HierarchyError;
pub use flatten::{DEFAULT_INDENT_MARKER, HierarchyBuilder, build_hierarchy};
pub use types::{HierarchyEntry, LedgerNode};
