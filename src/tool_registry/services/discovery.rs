//! Tool discovery over a freshly opened provider channel.

use crate::tool_registry::{
    domain::{DiscoveredTool, ToolProvider},
    ports::{ChannelOpener, DiscoveryResult, ToolDiscovery},
};
use async_trait::async_trait;
use tracing::debug;

/// Discovers tools by opening a channel, listing the catalog and closing.
///
/// Each call opens its own channel; nothing is cached here.
#[derive(Debug, Clone)]
pub struct ToolDiscoveryClient<O>
where
    O: ChannelOpener,
{
    opener: O,
}

impl<O> ToolDiscoveryClient<O>
where
    O: ChannelOpener,
{
    /// Creates a client that reaches providers through `opener`.
    #[must_use]
    pub const fn new(opener: O) -> Self {
        Self { opener }
    }

    /// Returns the channel opener.
    #[must_use]
    pub const fn opener(&self) -> &O {
        &self.opener
    }
}

#[async_trait]
impl<O> ToolDiscovery for ToolDiscoveryClient<O>
where
    O: ChannelOpener,
{
    async fn discover(&self, provider: &ToolProvider) -> DiscoveryResult<Vec<DiscoveredTool>> {
        let mut channel = self.opener.open(&provider.channel_target()).await?;
        let listed = channel.list_tools().await;
        if let Err(err) = channel.close().await {
            debug!(provider_id = %provider.id(), error = %err, "failed to close provider channel");
        }

        Ok(listed?.into_iter().map(DiscoveredTool::from).collect())
    }
}
