//! Transport selection for remote tool providers.

use super::{SseChannel, StreamableHttpChannel, headers::header_map};
use crate::config::TransportConfig;
use crate::tool_registry::{
    domain::{ChannelTarget, ProviderTransport},
    ports::{ChannelOpener, DiscoveryError, DiscoveryResult, ToolChannel},
};
use async_trait::async_trait;
use tracing::debug;

/// Opens the channel variant matching each provider's transport kind.
#[derive(Debug, Clone, Default)]
pub struct RemoteChannelOpener {
    config: TransportConfig,
}

impl RemoteChannelOpener {
    /// Creates an opener using the given transport settings.
    #[must_use]
    pub const fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Returns the transport settings.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn client_for(&self, transport: &ProviderTransport) -> DiscoveryResult<reqwest::Client> {
        reqwest::Client::builder()
            .default_headers(header_map(transport.headers())?)
            .connect_timeout(self.config.connect_timeout())
            .build()
            .map_err(DiscoveryError::connection)
    }
}

#[async_trait]
impl ChannelOpener for RemoteChannelOpener {
    async fn open(&self, target: &ChannelTarget) -> DiscoveryResult<Box<dyn ToolChannel>> {
        let http = self.client_for(target.transport())?;
        debug!(
            url = %target.url(),
            transport = %target.transport().kind(),
            "opening provider channel"
        );
        match target.transport() {
            ProviderTransport::Streaming(_) => {
                let channel = SseChannel::connect(http, target.url(), &self.config).await?;
                Ok(Box::new(channel))
            }
            ProviderTransport::RequestResponse(_) => {
                let channel =
                    StreamableHttpChannel::connect(http, target.url(), &self.config).await?;
                Ok(Box::new(channel))
            }
        }
    }
}
