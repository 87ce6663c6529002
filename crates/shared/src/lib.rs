//! Shared types, errors, and configuration for Hoffstee.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - Explicit session context (tokens, current user)
//! - Logging initialization

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod types;


pub use auth::TokenPair;
pub use config::AppConfig;
pub use error::AppError;
pub use session::{Session, SessionError};
