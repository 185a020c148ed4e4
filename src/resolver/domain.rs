//! Registered-domain resolution for a hostname.
//!
//! # Responsibilities
//! - Derive every suffix of the hostname down to the second-level domain
//! - Query private and shared domains for any of those names in one pass
//! - Pick the most specific suffix the platform knows about
//!
//! # Design Decisions
//! - The two domain collections are independent reads, fetched concurrently
//! - Not found is `Ok(None)`, left to the caller to report

use futures_util::future::try_join_all;

use crate::platform::client::{in_filter, PlatformClient};
use crate::platform::error::ApiResult;
use crate::platform::types::Domain;

/// Domain collections searched, in merge order.
pub const DOMAIN_ENDPOINTS: [&str; 2] = ["/v2/private_domains", "/v2/shared_domains"];

/// All domain levels of `hostname`, most specific first, down to the
/// second-level domain. A hostname with N labels yields N-1 candidates.
pub fn candidate_domains(hostname: &str) -> Vec<String> {
    let labels: Vec<&str> = hostname.split('.').collect();
    (0..labels.len().saturating_sub(1))
        .map(|i| labels[i..].join("."))
        .collect()
}

pub struct DomainResolver<'a> {
    client: &'a PlatformClient,
}

impl<'a> DomainResolver<'a> {
    pub fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// Find the registered domain owning `hostname`.
    pub async fn resolve(&self, hostname: &str) -> ApiResult<Option<Domain>> {
        let candidates = candidate_domains(hostname);
        if candidates.is_empty() {
            tracing::debug!(%hostname, "Hostname has a single label, no candidate domains");
            return Ok(None);
        }

        let domains = self.fetch_domains(&candidates).await?;
        tracing::debug!(candidates = candidates.len(), fetched = domains.len(), "Fetched matching domains");

        let found = candidates.iter().find_map(|candidate| {
            domains
                .iter()
                .find(|domain| domain.name.eq_ignore_ascii_case(candidate))
                .cloned()
        });
        Ok(found)
    }

    async fn fetch_domains(&self, names: &[String]) -> ApiResult<Vec<Domain>> {
        let query = self.client.list_query().filter(in_filter("name", names));
        let pages = try_join_all(
            DOMAIN_ENDPOINTS
                .iter()
                .map(|endpoint| self.client.fetch_all::<Domain>(endpoint, &query)),
        )
        .await?;
        Ok(pages.into_iter().flatten().collect())
    }
}
