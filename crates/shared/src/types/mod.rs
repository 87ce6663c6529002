//! Common types used across the application.

pub mod id;
pub mod serde_helpers;

pub use id::*;
