//! Memoized discovery result for one endpoint.

use super::DiscoveredTool;
use chrono::{DateTime, TimeDelta, Utc};

/// Tools fetched from one URL and the time of the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCacheEntry {
    tools: Vec<DiscoveredTool>,
    fetched_at: DateTime<Utc>,
}

impl ToolCacheEntry {
    /// Creates an entry for a fetch completed at `fetched_at`.
    #[must_use]
    pub const fn new(tools: Vec<DiscoveredTool>, fetched_at: DateTime<Utc>) -> Self {
        Self { tools, fetched_at }
    }

    /// Returns the cached tools in reported order.
    #[must_use]
    pub fn tools(&self) -> &[DiscoveredTool] {
        &self.tools
    }

    /// Returns when the fetch completed.
    #[must_use]
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Returns whether the entry is still valid at `now`.
    ///
    /// An entry is fresh while the elapsed time is at most `ttl`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.fetched_at) <= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, true)]
    #[case(3600, true)]
    #[case(3601, false)]
    fn freshness_boundary_is_inclusive(#[case] elapsed_secs: i64, #[case] expected: bool) {
        let fetched_at = Utc::now();
        let entry = ToolCacheEntry::new(Vec::new(), fetched_at);
        let now = fetched_at + TimeDelta::seconds(elapsed_secs);
        assert_eq!(entry.is_fresh(now, TimeDelta::seconds(3600)), expected);
    }
}
