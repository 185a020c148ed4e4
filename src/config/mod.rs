//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI flag overrides (main.rs), re-validated
//!     → LookupConfig (validated, immutable for the invocation)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the tool runs without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ApiConfig, AppStrategy, LookupConfig, ObservabilityConfig, ResolveConfig};
pub use validation::validate_config;
