//! Core business logic for Hoffstee.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The ERP API is reached only through the [`voucher::VoucherGateway`] trait.
//!
//! # Modules
//!
//! - `hierarchy` - Ledger parent/child flattening for dropdowns
//! - `voucher` - Voucher form state, double-entry validation and submission
//! - `access` - Page permission records and capability checks

pub mod access;
pub mod hierarchy;
pub mod voucher;
