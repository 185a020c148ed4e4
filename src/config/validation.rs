//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the API endpoint is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0, page size within platform limits)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LookupConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::LookupConfig;

/// Largest page size the platform accepts for list endpoints.
pub const MAX_RESULTS_PER_PAGE: u32 = 100;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

pub fn validate_config(config: &LookupConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.api.endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: "api.endpoint",
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "api.endpoint",
            message: format!("invalid URL '{}': {}", config.api.endpoint, e),
        }),
    }

    if config.api.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "api.timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    let per_page = config.lookup.results_per_page;
    if per_page == 0 || per_page > MAX_RESULTS_PER_PAGE {
        errors.push(ValidationError {
            field: "lookup.results_per_page",
            message: format!("must be between 1 and {}, got {}", MAX_RESULTS_PER_PAGE, per_page),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
