//! Typed IDs for type-safe entity references.
//!
//! The backend hands out integer identifiers. Wrapping them prevents
//! accidentally passing a `UserId` where a `LedgerId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The sentinel used by the backend for "nothing selected".
            pub const UNSET: Self = Self(0);

            /// Creates an ID from a raw backend value.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the inner value.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Returns true if this is the `0` sentinel.
            #[must_use]
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(LedgerId, "Unique identifier for a ledger account.");
typed_id!(UserId, "Unique identifier for a user.");
typed_id!(VoucherId, "Unique identifier for a voucher.");
typed_id!(VoucherTypeId, "Unique identifier for a voucher type.");
typed_id!(VoucherLineId, "Unique identifier for a voucher entry line.");
