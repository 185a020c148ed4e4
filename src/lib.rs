//! Hostname → application lookup for a multi-tenant PaaS control plane.

pub mod config;
pub mod lookup;
pub mod observability;
pub mod platform;
pub mod resolver;
pub mod targets;

pub use config::LookupConfig;
pub use lookup::{LookupOutcome, RouteLookup};
pub use platform::{CliConnection, HttpConnection, PlatformClient};
