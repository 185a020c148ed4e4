//! Route resolution within a domain.

use crate::platform::client::{eq_filter, PlatformClient};
use crate::platform::error::ApiResult;
use crate::platform::types::{Domain, Route};
use crate::resolver::wildcard::WildcardMatcher;

/// A route together with its fully-qualified hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    pub route: Route,
    pub hostname: String,
}

pub struct RouteResolver<'a> {
    client: &'a PlatformClient,
}

impl<'a> RouteResolver<'a> {
    pub fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// List routes of `domain` whose hostname matches the `hostname` pattern.
    /// An empty result is not an error.
    pub async fn resolve(&self, domain: &Domain, hostname: &str) -> ApiResult<Vec<MatchedRoute>> {
        let query = self.client.list_query().filter(eq_filter("domain_guid", &domain.guid));
        let routes: Vec<Route> = self.client.fetch_all("/v2/routes", &query).await?;
        tracing::debug!(domain = %domain.name, routes = routes.len(), "Fetched domain routes");

        let matcher = WildcardMatcher::new(hostname);
        Ok(routes
            .into_iter()
            .filter_map(|route| {
                let route_hostname = route.hostname(&domain.name);
                matcher.matches(&route_hostname).then(|| MatchedRoute {
                    route,
                    hostname: route_hostname,
                })
            })
            .collect())
    }
}
