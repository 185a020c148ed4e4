//! Invocation-scoped org/space cache.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::observability::metrics;
use crate::platform::client::PlatformClient;
use crate::platform::error::ApiResult;
use crate::platform::types::{Organization, Space};

type Slots<T> = DashMap<String, Arc<OnceCell<T>>>;

/// Memoizes space-by-GUID and organization-by-GUID lookups.
///
/// Built fresh for each lookup and dropped with it; there is no eviction.
/// Each GUID has one slot, so concurrent callers share a single in-flight
/// fetch and a cached value is never overwritten. A failed fetch leaves
/// the slot empty.
pub struct OrgSpaceCache {
    client: PlatformClient,
    spaces: Slots<Space>,
    orgs: Slots<Organization>,
}

impl OrgSpaceCache {
    pub fn new(client: PlatformClient) -> Self {
        Self {
            client,
            spaces: DashMap::new(),
            orgs: DashMap::new(),
        }
    }

    pub async fn space_by_guid(&self, guid: &str) -> ApiResult<Space> {
        memoized(&self.client, &self.spaces, "space", guid, format!("/v2/spaces/{}", guid)).await
    }

    pub async fn org_by_guid(&self, guid: &str) -> ApiResult<Organization> {
        memoized(&self.client, &self.orgs, "org", guid, format!("/v2/organizations/{}", guid)).await
    }

    /// Resolve a space and then the organization owning it.
    pub async fn target_by_space_guid(&self, space_guid: &str) -> ApiResult<(Organization, Space)> {
        let space = self.space_by_guid(space_guid).await?;
        let org = self.org_by_guid(&space.organization_guid).await?;
        Ok((org, space))
    }

    /// Number of spaces cached so far.
    pub fn cached_spaces(&self) -> usize {
        self.spaces.iter().filter(|slot| slot.value().initialized()).count()
    }

    /// Number of organizations cached so far.
    pub fn cached_orgs(&self) -> usize {
        self.orgs.iter().filter(|slot| slot.value().initialized()).count()
    }
}

impl std::fmt::Debug for OrgSpaceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrgSpaceCache")
            .field("spaces", &self.cached_spaces())
            .field("orgs", &self.cached_orgs())
            .finish()
    }
}

async fn memoized<T>(
    client: &PlatformClient,
    slots: &Slots<T>,
    kind: &'static str,
    guid: &str,
    path: String,
) -> ApiResult<T>
where
    T: Clone + DeserializeOwned,
{
    // Clone the slot out so no map shard lock is held across the fetch
    let slot = slots.entry(guid.to_string()).or_default().value().clone();

    if let Some(value) = slot.get() {
        metrics::record_cache_lookup(kind, true);
        tracing::debug!(kind, guid, "Cache hit");
        return Ok(value.clone());
    }

    metrics::record_cache_lookup(kind, false);
    let value = slot.get_or_try_init(|| client.get::<T>(&path)).await?;
    Ok(value.clone())
}
