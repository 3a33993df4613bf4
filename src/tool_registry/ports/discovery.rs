//! Tool discovery port consumed by the coordinator.

use super::DiscoveryResult;
use crate::tool_registry::domain::{DiscoveredTool, ToolProvider};
use async_trait::async_trait;

/// Enumerates the tools a provider exposes.
///
/// Implementations perform no caching; results are all-or-nothing.
#[async_trait]
pub trait ToolDiscovery: Send + Sync {
    /// Fetches the provider's current tool catalog.
    async fn discover(&self, provider: &ToolProvider) -> DiscoveryResult<Vec<DiscoveredTool>>;
}
