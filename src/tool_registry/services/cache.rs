//! Time-bounded discovery result cache keyed by endpoint URL.

use crate::config::CacheConfig;
use crate::tool_registry::domain::{DiscoveredTool, ProviderUrl, ToolCacheEntry};
use chrono::TimeDelta;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use tracing::debug;

/// Discovery results shared by every provider pointing at the same URL.
///
/// Entries older than the configured window are treated as absent and are
/// evicted on the lookup that finds them stale.
pub struct ToolCache<C>
where
    C: Clock + Send + Sync,
{
    entries: RwLock<HashMap<ProviderUrl, ToolCacheEntry>>,
    clock: Arc<C>,
    ttl: TimeDelta,
}

impl<C> ToolCache<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new(config: CacheConfig, clock: Arc<C>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl: TimeDelta::from_std(config.ttl()).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Returns the cached tools for `url` while the entry is fresh.
    ///
    /// A stale entry is removed before returning `None`.
    #[must_use]
    pub fn get(&self, url: &ProviderUrl) -> Option<Vec<DiscoveredTool>> {
        let now = self.clock.utc();
        let mut entries = self.write_entries();
        let entry = entries.get(url)?;
        if entry.is_fresh(now, self.ttl) {
            debug!(url = %url, "tool cache hit");
            return Some(entry.tools().to_vec());
        }
        entries.remove(url);
        debug!(url = %url, "tool cache entry expired");
        None
    }

    /// Stores `tools` for `url`, replacing any previous entry.
    pub fn put(&self, url: &ProviderUrl, tools: Vec<DiscoveredTool>) {
        let entry = ToolCacheEntry::new(tools, self.clock.utc());
        self.write_entries().insert(url.clone(), entry);
        debug!(url = %url, "tool cache populated");
    }

    /// Drops the entry for `url`, if any.
    pub fn invalidate(&self, url: &ProviderUrl) {
        if self.write_entries().remove(url).is_some() {
            debug!(url = %url, "tool cache entry invalidated");
        }
    }

    /// Drops every stale entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.utc();
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now, self.ttl));
        let purged = before - entries.len();
        if purged > 0 {
            debug!(purged, "purged expired tool cache entries");
        }
        purged
    }

    /// Returns the number of stored entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<ProviderUrl, ToolCacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
