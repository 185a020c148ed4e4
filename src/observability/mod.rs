//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolvers and the orchestrator produce:
//!     → logging.rs (structured log events to stderr)
//!     → metrics.rs (API call and cache counters)
//!
//! Consumers:
//!     → operator terminal (log filter via RUST_LOG or config)
//!     → any metrics recorder installed by an embedding process
//! ```
//!
//! # Design Decisions
//! - Report lines go to stdout, diagnostics to stderr
//! - Each invocation is wrapped in a span with its own ID
//! - Metrics go through the `metrics` facade; no exporter in the CLI

pub mod logging;
pub mod metrics;
