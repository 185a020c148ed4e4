//! End-to-end hostname lookup.
//!
//! # Stages
//! ```text
//! ResolveDomain → ResolveRoutes → ResolveApplications → GroupAndPresent
//!     → (optional) RetargetContext → Done
//! ```
//! - Any resolver failure ends the lookup with an error
//! - No domain or no matching route ends it with `NotBound`
//! - Events emitted before a failure are not taken back

use crate::config::AppStrategy;
use crate::lookup::error::{LookupError, LookupResult};
use crate::lookup::report::{
    Binding, LookupEvent, LookupOutcome, NotBoundReason, Report, ReportSink, RetargetOutcome, SpaceGroup,
};
use crate::platform::client::PlatformClient;
use crate::resolver::{resolver_for, ApplicationResolver, DomainResolver, MatchedRoute, RouteResolver};
use crate::targets::OrgSpaceCache;

/// Trim whitespace and a trailing root dot, lowercase.
pub fn normalize_hostname(hostname: &str) -> String {
    hostname.trim().trim_end_matches('.').to_lowercase()
}

/// Resolves a hostname to its bound applications for one invocation.
#[derive(Debug)]
pub struct RouteLookup {
    client: PlatformClient,
    apps: Box<dyn ApplicationResolver>,
    cache: OrgSpaceCache,
}

impl RouteLookup {
    pub fn new(client: PlatformClient, strategy: AppStrategy) -> Self {
        Self::with_resolver(client, resolver_for(strategy))
    }

    pub fn with_resolver(client: PlatformClient, apps: Box<dyn ApplicationResolver>) -> Self {
        let cache = OrgSpaceCache::new(client.clone());
        Self { client, apps, cache }
    }

    pub fn cache(&self) -> &OrgSpaceCache {
        &self.cache
    }

    /// Run the full pipeline for `hostname`, optionally switching the
    /// active context to the owner of the first bound application.
    pub async fn run(&self, hostname: &str, retarget: bool, sink: &mut dyn ReportSink) -> LookupResult<LookupOutcome> {
        let hostname = normalize_hostname(hostname);

        let Some(domain) = DomainResolver::new(&self.client).resolve(&hostname).await? else {
            tracing::info!(%hostname, "No registered domain for hostname");
            return Ok(LookupOutcome::NotBound {
                reason: NotBoundReason::DomainNotFound,
            });
        };
        tracing::info!(domain = %domain.name, guid = %domain.guid, "Resolved domain");

        let routes = RouteResolver::new(&self.client).resolve(&domain, &hostname).await?;
        if routes.is_empty() {
            tracing::info!(%hostname, domain = %domain.name, "No matching routes");
            return Ok(LookupOutcome::NotBound {
                reason: NotBoundReason::NoMatchingRoutes,
            });
        }
        tracing::info!(routes = routes.len(), "Matched routes");

        let mut bindings = self.resolve_bindings(routes).await?;
        // Stable: routes sharing a space keep their listing order
        bindings.sort_by(|a, b| a.route.space_guid.cmp(&b.route.space_guid));

        let groups = self.group(bindings, sink).await?;
        let mut report = Report {
            domain,
            groups,
            retarget: None,
        };

        if retarget {
            report.retarget = Some(self.retarget(&report).await?);
        }

        Ok(LookupOutcome::Bound(report))
    }

    async fn resolve_bindings(&self, routes: Vec<MatchedRoute>) -> LookupResult<Vec<Binding>> {
        let mut bindings = Vec::with_capacity(routes.len());
        for MatchedRoute { route, hostname } in routes {
            let apps = self.apps.resolve(&self.client, &route).await?;
            if apps.is_empty() {
                tracing::debug!(route = %route.guid, %hostname, "Unbound route");
                bindings.push(Binding {
                    route,
                    hostname,
                    app: None,
                });
                continue;
            }
            for app in apps {
                bindings.push(Binding {
                    route: route.clone(),
                    hostname: hostname.clone(),
                    app: Some(app),
                });
            }
        }
        Ok(bindings)
    }

    /// Walk sorted bindings, resolving org/space once per space boundary.
    async fn group(&self, bindings: Vec<Binding>, sink: &mut dyn ReportSink) -> LookupResult<Vec<SpaceGroup>> {
        sink.emit(LookupEvent::Bound {
            bindings: bindings.len(),
        });

        let mut groups: Vec<SpaceGroup> = Vec::new();
        let mut current_space: Option<String> = None;
        for binding in bindings {
            if current_space.as_deref() != Some(binding.route.space_guid.as_str()) {
                let space_guid = binding.route.space_guid.clone();
                current_space = Some(space_guid.clone());
                let (org, space) = self
                    .cache
                    .target_by_space_guid(&space_guid)
                    .await
                    .map_err(|source| LookupError::Target { space_guid, source })?;
                sink.emit(LookupEvent::Space {
                    org: &org,
                    space: &space,
                });
                groups.push(SpaceGroup {
                    org,
                    space,
                    bindings: Vec::new(),
                });
            }

            sink.emit(LookupEvent::Binding(&binding));
            if let Some(group) = groups.last_mut() {
                group.bindings.push(binding);
            }
        }
        Ok(groups)
    }

    async fn retarget(&self, report: &Report) -> LookupResult<RetargetOutcome> {
        let Some(app) = report.first_app() else {
            tracing::warn!("Retarget requested but no application is bound");
            return Ok(RetargetOutcome::Unavailable);
        };

        let space_guid = app.space_guid.clone();
        let (org, space) = self
            .cache
            .target_by_space_guid(&space_guid)
            .await
            .map_err(|source| LookupError::Target { space_guid, source })?;

        self.client
            .connection()
            .target(&org.name, &space.name)
            .await
            .map_err(|source| LookupError::Retarget {
                org: org.name.clone(),
                space: space.name.clone(),
                source,
            })?;

        tracing::info!(org = %org.name, space = %space.name, app = %app.name, "Changed target");
        Ok(RetargetOutcome::Changed {
            org: org.name,
            space: space.name,
        })
    }
}
