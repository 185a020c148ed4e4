//! Single-call and paginated fetches against the platform API.
//!
//! # Responsibilities
//! - Turn a raw host call into a checked body (empty body, error envelope)
//! - Decode bodies into typed resources
//! - Follow `next_url` until the chain ends and concatenate the pages
//!
//! # Design Decisions
//! - `next_url` is used verbatim and supersedes the original query
//! - A repeated `next_url` ends the walk instead of looping forever
//! - Any failure aborts the whole paginated fetch; no retries

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;

use crate::observability::metrics;
use crate::platform::connection::CliConnection;
use crate::platform::error::{ApiError, ApiResult};
use crate::platform::types::{ErrorEnvelope, Page};

/// Query for a list endpoint: an optional `q` filter and a page size hint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    filter: Option<String>,
    results_per_page: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn results_per_page(mut self, n: u32) -> Self {
        self.results_per_page = Some(n);
        self
    }

    /// `endpoint` with the form-encoded query appended.
    pub fn to_path(&self, endpoint: &str) -> String {
        let mut params = url::form_urlencoded::Serializer::new(String::new());
        if let Some(filter) = &self.filter {
            params.append_pair("q", filter);
        }
        if let Some(n) = self.results_per_page {
            params.append_pair("results-per-page", &n.to_string());
        }
        let query = params.finish();
        if query.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query)
        }
    }
}

/// `field IN a,b,c`
pub fn in_filter(field: &str, values: &[String]) -> String {
    format!("{} IN {}", field, values.join(","))
}

/// `field:value`
pub fn eq_filter(field: &str, value: &str) -> String {
    format!("{}:{}", field, value)
}

/// Typed access to the platform API over a host connection.
#[derive(Clone)]
pub struct PlatformClient {
    conn: Arc<dyn CliConnection>,
    results_per_page: u32,
}

impl PlatformClient {
    pub fn new<C: CliConnection + 'static>(conn: C, results_per_page: u32) -> Self {
        Self {
            conn: Arc::new(conn),
            results_per_page,
        }
    }

    pub fn connection(&self) -> &dyn CliConnection {
        self.conn.as_ref()
    }

    /// A list query carrying the configured page size.
    pub fn list_query(&self) -> ListQuery {
        ListQuery::new().results_per_page(self.results_per_page)
    }

    /// Issue one call and check the body for emptiness and platform errors.
    /// The call is counted as `ok` only once its body decodes.
    pub async fn call(&self, path: &str) -> ApiResult<String> {
        let body = match self.conn.curl(path).await {
            Ok(body) => body,
            Err(e) => {
                metrics::record_api_call("transport_error");
                return Err(e.into());
            }
        };

        if body.trim().is_empty() {
            metrics::record_api_call("empty");
            return Err(ApiError::EmptyResponse {
                path: path.to_string(),
            });
        }

        if let Some(envelope) = ErrorEnvelope::detect(&body) {
            metrics::record_api_call("platform_error");
            return Err(ApiError::Platform {
                path: path.to_string(),
                code: envelope.code,
                error_code: envelope.error_code,
                description: envelope.description,
            });
        }

        Ok(body)
    }

    /// Fetch and decode a single resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.call(path).await?;
        decode(path, &body)
    }

    /// Fetch every page of a list endpoint, in page order.
    pub async fn fetch_all<T: DeserializeOwned>(&self, endpoint: &str, query: &ListQuery) -> ApiResult<Vec<T>> {
        let mut uri = query.to_path(endpoint);
        let mut seen = HashSet::new();
        let mut resources = Vec::new();

        loop {
            if !seen.insert(uri.clone()) {
                tracing::warn!(next_url = %uri, "Pagination revisited a page, stopping");
                break;
            }

            let body = self.call(&uri).await?;
            let page: Page<T> = decode(&uri, &body)?;
            tracing::debug!(path = %uri, count = page.resources.len(), "Fetched page");

            let next = page.next().map(str::to_string);
            resources.extend(page.resources);
            match next {
                Some(next) => uri = next,
                None => break,
            }
        }

        Ok(resources)
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("results_per_page", &self.results_per_page)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> ApiResult<T> {
    match serde_json::from_str(body) {
        Ok(value) => {
            metrics::record_api_call("ok");
            Ok(value)
        }
        Err(source) => {
            metrics::record_api_call("decode_error");
            Err(ApiError::Decode {
                path: path.to_string(),
                source,
            })
        }
    }
}
