//! Roster Core
//!
//! Shared domain types and stateless utilities for the Roster
//! user-management client.
//!
//! This crate defines:
//! - **Domain Types**: `User` and the `UserId` identifier
//! - **Utilities**: date formatting, email validation, input sanitization,
//!   structural JSON cloning
//!
//! # Example
//!
//! ```rust
//! use roster_core::types::{User, UserId};
//! use roster_core::utils::validate_email;
//!
//! let id = UserId::new("user-42");
//! assert!(validate_email("alice@example.com"));
//! ```

#![forbid(unsafe_code)]

pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::{User, UserId};
