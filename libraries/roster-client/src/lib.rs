//! Roster Client
//!
//! HTTP client library for the Roster user-management API.
//!
//! # Features
//!
//! - **User operations**: get, create, update, delete against `/api/v1`
//! - **Caching**: unbounded in-memory cache keyed by user id, invalidated
//!   on every write
//! - **Pluggable transport**: the [`ApiTransport`] trait lets tests swap
//!   the network out for a mock
//!
//! # Example
//!
//! ```ignore
//! use roster_client::{HttpTransport, UserService};
//! use roster_core::types::UserId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new("https://roster.example.com")?;
//!     let service = UserService::new(transport);
//!
//!     if let Some(user) = service.get_user_by_id(&UserId::new("user-42")).await? {
//!         println!("{} <{}>", user.name, user.email);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod cache;
mod error;
mod service;
mod transport;

// Re-export main types
pub use cache::UserCache;
pub use error::{ClientError, Result};
pub use service::UserService;
pub use transport::{ApiResponse, ApiTransport, HttpTransport};
