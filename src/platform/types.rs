//! Resource envelopes and typed platform entities.
//!
//! List and single-resource endpoints wrap every entity as
//! `{ "metadata": { "guid": ... }, "entity": { ... } }`; list endpoints add
//! a `{ "next_url": ..., "resources": [...] }` page around them. The public
//! types flatten that shape so the resolvers only deal with plain fields.

use serde::{Deserialize, Serialize};

/// Resource metadata shared by every entity.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub guid: String,
}

/// A `{ metadata, entity }` resource as returned by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}

impl<T> Page<T> {
    /// The next page to fetch, if the chain continues.
    pub fn next(&self) -> Option<&str> {
        self.next_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Platform-reported error, e.g.
/// `{ "description": "Unknown request", "error_code": "CF-NotFound", "code": 10000 }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorEnvelope {
    pub description: String,
    pub error_code: String,
    pub code: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnvelopeShape {
    One(ErrorEnvelope),
    Many(Vec<ErrorEnvelope>),
}

impl ErrorEnvelope {
    /// Returns the envelope if `body` is a platform error, either as an
    /// object or as an array whose first element is one.
    pub fn detect(body: &str) -> Option<ErrorEnvelope> {
        let envelope = match serde_json::from_str::<EnvelopeShape>(body).ok()? {
            EnvelopeShape::One(envelope) => envelope,
            EnvelopeShape::Many(list) => list.into_iter().next()?,
        };
        if envelope.error_code.is_empty() {
            None
        } else {
            Some(envelope)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntity {
    pub name: String,
}

/// A registered domain (shared or private).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Resource<DomainEntity>")]
pub struct Domain {
    pub guid: String,
    pub name: String,
}

impl From<Resource<DomainEntity>> for Domain {
    fn from(res: Resource<DomainEntity>) -> Self {
        Self {
            guid: res.metadata.guid,
            name: res.entity.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntity {
    #[serde(default)]
    pub host: String,
    pub domain_guid: String,
    pub space_guid: String,
}

/// A host + domain combination that can receive traffic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Resource<RouteEntity>")]
pub struct Route {
    pub guid: String,
    /// Empty for a route on the bare domain.
    pub host: String,
    pub domain_guid: String,
    pub space_guid: String,
}

impl From<Resource<RouteEntity>> for Route {
    fn from(res: Resource<RouteEntity>) -> Self {
        Self {
            guid: res.metadata.guid,
            host: res.entity.host,
            domain_guid: res.entity.domain_guid,
            space_guid: res.entity.space_guid,
        }
    }
}

impl Route {
    /// Fully-qualified hostname of this route under `domain_name`.
    pub fn hostname(&self, domain_name: &str) -> String {
        if self.host.is_empty() {
            domain_name.to_string()
        } else {
            format!("{}.{}", self.host, domain_name)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingEntity {
    pub app_guid: String,
}

/// Binding record between a route and an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Resource<MappingEntity>")]
pub struct RouteMapping {
    pub guid: String,
    pub app_guid: String,
}

impl From<Resource<MappingEntity>> for RouteMapping {
    fn from(res: Resource<MappingEntity>) -> Self {
        Self {
            guid: res.metadata.guid,
            app_guid: res.entity.app_guid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppEntity {
    pub name: String,
    pub space_guid: String,
}

/// A deployed application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Resource<AppEntity>")]
pub struct Application {
    pub guid: String,
    pub name: String,
    pub space_guid: String,
}

impl From<Resource<AppEntity>> for Application {
    fn from(res: Resource<AppEntity>) -> Self {
        Self {
            guid: res.metadata.guid,
            name: res.entity.name,
            space_guid: res.entity.space_guid,
        }
    }
}

/// Flat body of `/v2/apps/:guid/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSummary {
    pub guid: String,
    pub name: String,
    pub space_guid: String,
}

impl From<AppSummary> for Application {
    fn from(summary: AppSummary) -> Self {
        Self {
            guid: summary.guid,
            name: summary.name,
            space_guid: summary.space_guid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpaceEntity {
    pub name: String,
    pub organization_guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Resource<SpaceEntity>")]
pub struct Space {
    pub guid: String,
    pub name: String,
    pub organization_guid: String,
}

impl From<Resource<SpaceEntity>> for Space {
    fn from(res: Resource<SpaceEntity>) -> Self {
        Self {
            guid: res.metadata.guid,
            name: res.entity.name,
            organization_guid: res.entity.organization_guid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrgEntity {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Resource<OrgEntity>")]
pub struct Organization {
    pub guid: String,
    pub name: String,
}

impl From<Resource<OrgEntity>> for Organization {
    fn from(res: Resource<OrgEntity>) -> Self {
        Self {
            guid: res.metadata.guid,
            name: res.entity.name,
        }
    }
}
