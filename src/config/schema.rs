//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the lookup tool.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for route lookup.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LookupConfig {
    /// Control-plane API connection settings.
    pub api: ApiConfig,

    /// Resolution pipeline settings.
    pub lookup: ResolveConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Control-plane API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the control-plane API (e.g., "https://api.example.com").
    pub endpoint: String,

    /// Environment variable holding the bearer token.
    pub token_env: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// File the active org/space context is written to on retarget.
    pub target_file: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            token_env: "CF_OAUTH_TOKEN".to_string(),
            timeout_secs: 30,
            target_file: ".route-lookup/target.toml".to_string(),
        }
    }
}

/// How a route's bound applications are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppStrategy {
    /// `/v2/routes/:guid/route_mappings`, then one app summary per mapping.
    Mapping,
    /// `/v2/routes/:guid/apps`, paginated.
    #[default]
    Direct,
}

impl std::str::FromStr for AppStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mapping" => Ok(AppStrategy::Mapping),
            "direct" => Ok(AppStrategy::Direct),
            other => Err(format!("unknown app strategy '{}' (expected mapping or direct)", other)),
        }
    }
}

/// Resolution pipeline settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Application resolution strategy.
    pub app_strategy: AppStrategy,

    /// Page size hint sent with every list request.
    pub results_per_page: u32,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            app_strategy: AppStrategy::default(),
            results_per_page: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
