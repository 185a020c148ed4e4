//! Control-plane API access.
//!
//! # Data Flow
//! ```text
//! resolver asks for an endpoint + query
//!     → client.rs (build path, call, check body)
//!     → connection.rs (host capability: authenticated GET)
//!     → client.rs (error envelope? decode page, follow next_url)
//!     → types.rs (flattened Domain / Route / Application / Space / Organization)
//! ```
//!
//! # Design Decisions
//! - The host connection is a trait so tests and embedders supply their own
//! - Every list endpoint is paginated through the same loop
//! - Platform error envelopes become typed errors carrying the path

pub mod client;
pub mod connection;
pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{ListQuery, PlatformClient};
pub use connection::{CliConnection, HttpConnection, TargetRecord};
pub use error::{ApiError, ApiResult, TransportError};
pub use types::{Application, Domain, Organization, Route, Space};
