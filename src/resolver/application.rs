//! Application resolution for a route.
//!
//! # Strategies
//! - `MappingResolver`: route → route mappings → one app summary per mapping
//! - `DirectResolver`: route → apps collection, paginated
//!
//! Both return an empty list for an unbound route; the caller keeps the
//! route and reports it as unbound.

use async_trait::async_trait;

use crate::config::AppStrategy;
use crate::platform::client::PlatformClient;
use crate::platform::error::ApiResult;
use crate::platform::types::{AppSummary, Application, Route, RouteMapping};

/// Finds the applications bound to a route.
#[async_trait]
pub trait ApplicationResolver: Send + Sync + std::fmt::Debug {
    async fn resolve(&self, client: &PlatformClient, route: &Route) -> ApiResult<Vec<Application>>;
}

/// Resolves through route mappings, for platforms exposing `route_mappings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingResolver;

#[async_trait]
impl ApplicationResolver for MappingResolver {
    async fn resolve(&self, client: &PlatformClient, route: &Route) -> ApiResult<Vec<Application>> {
        let endpoint = format!("/v2/routes/{}/route_mappings", route.guid);
        let mappings: Vec<RouteMapping> = client.fetch_all(&endpoint, &client.list_query()).await?;
        tracing::debug!(route = %route.guid, mappings = mappings.len(), "Fetched route mappings");

        let mut apps = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            let summary: AppSummary = client.get(&format!("/v2/apps/{}/summary", mapping.app_guid)).await?;
            apps.push(Application::from(summary));
        }
        Ok(apps)
    }
}

/// Lists the route's apps collection directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectResolver;

#[async_trait]
impl ApplicationResolver for DirectResolver {
    async fn resolve(&self, client: &PlatformClient, route: &Route) -> ApiResult<Vec<Application>> {
        let endpoint = format!("/v2/routes/{}/apps", route.guid);
        let apps: Vec<Application> = client.fetch_all(&endpoint, &client.list_query()).await?;
        tracing::debug!(route = %route.guid, apps = apps.len(), "Fetched route apps");
        Ok(apps)
    }
}

/// The resolver matching the configured platform API strategy.
pub fn resolver_for(strategy: AppStrategy) -> Box<dyn ApplicationResolver> {
    match strategy {
        AppStrategy::Mapping => Box::new(MappingResolver),
        AppStrategy::Direct => Box::new(DirectResolver),
    }
}
