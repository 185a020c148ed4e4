//! Host capability: authenticated calls against the control-plane API.
//!
//! # Responsibilities
//! - Issue a GET for an API path and hand back the raw body
//! - Switch the operator's active org/space context
//!
//! # Design Decisions
//! - Auth is owned by the connection, never by the resolvers
//! - Non-2xx responses still return their body so the caller can decode
//!   the platform error envelope
//! - No retries; a failed call is reported once
//! - Absolute URLs must stay on the endpoint's origin

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::{Origin, Url};

use crate::config::ApiConfig;
use crate::platform::error::TransportError;

/// What the resolution pipeline needs from its host environment.
#[async_trait]
pub trait CliConnection: Send + Sync {
    /// Issue an authenticated GET for `path` and return the response body.
    ///
    /// `path` is either relative to the API root (`/v2/routes?...`) or a
    /// `next_url` exactly as the platform returned it.
    async fn curl(&self, path: &str) -> Result<String, TransportError>;

    /// Make `org`/`space` the active context.
    async fn target(&self, org: &str, space: &str) -> Result<(), TransportError>;
}

/// Active org/space context as persisted by [`HttpConnection::target`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetRecord {
    pub org: String,
    pub space: String,
}

/// `reqwest`-backed connection to a control-plane API.
#[derive(Clone)]
pub struct HttpConnection {
    client: Client,
    endpoint: String,
    origin: Origin,
    token: Option<String>,
    target_file: PathBuf,
}

impl HttpConnection {
    /// Build a connection from configuration.
    ///
    /// The bearer token is read from the environment variable named by
    /// `config.token_env`; a missing variable means unauthenticated calls.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let token = std::env::var(&config.token_env)
            .ok()
            .map(|t| t.trim().trim_start_matches("bearer ").trim_start_matches("Bearer ").to_string())
            .filter(|t| !t.is_empty());
        if token.is_none() {
            tracing::warn!(token_env = %config.token_env, "No API token in environment, calls are unauthenticated");
        }

        let base = Url::parse(&config.endpoint)
            .map_err(|e| TransportError::Other(format!("invalid API endpoint '{}': {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            origin: base.origin(),
            token,
            target_file: PathBuf::from(&config.target_file),
        })
    }

    /// Resolve `path` against the API endpoint. An absolute URL is only
    /// accepted on the endpoint's own scheme, host and port, so the token
    /// never leaves the API.
    fn url_for(&self, path: &str) -> Result<String, TransportError> {
        if !(path.starts_with("http://") || path.starts_with("https://")) {
            return Ok(format!("{}{}", self.endpoint, path));
        }

        let url = Url::parse(path).map_err(|e| TransportError::Other(format!("invalid URL '{}': {}", path, e)))?;
        if url.origin() != self.origin {
            tracing::warn!(url = %path, "Refusing to follow a URL outside the API host");
            return Err(TransportError::Other(format!("next_url leaves the API host: {}", path)));
        }
        Ok(url.into())
    }
}

#[async_trait]
impl CliConnection for HttpConnection {
    async fn curl(&self, path: &str) -> Result<String, TransportError> {
        let url = self.url_for(path)?;
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let res = request.send().await?;
        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "API returned non-success status");
        }
        Ok(res.text().await?)
    }

    async fn target(&self, org: &str, space: &str) -> Result<(), TransportError> {
        let record = TargetRecord {
            org: org.to_string(),
            space: space.to_string(),
        };
        let content = toml::to_string(&record).map_err(|e| TransportError::Other(e.to_string()))?;

        if let Some(parent) = self.target_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.target_file, content).await?;

        tracing::info!(org, space, path = %self.target_file.display(), "Active target written");
        Ok(())
    }
}

impl std::fmt::Debug for HttpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnection")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.token.is_some())
            .field("target_file", &self.target_file)
            .finish()
    }
}
