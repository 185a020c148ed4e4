//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Pick the filter from the environment, then config, then a default
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr so stdout carries only the lookup report

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor a config level is usable.
pub const DEFAULT_FILTER: &str = "route_lookup=info";

/// Build the filter directive for a configured log level.
///
/// A bare level such as `debug` is scoped to this crate so dependency
/// noise (hyper, reqwest) stays at warn.
pub fn filter_for_level(level: &str) -> String {
    let level = level.trim();
    match level.to_ascii_lowercase().as_str() {
        "" => DEFAULT_FILTER.to_string(),
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {
            format!("warn,route_lookup={}", level.to_ascii_lowercase())
        }
        _ => level.to_string(),
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_for_level(level)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
