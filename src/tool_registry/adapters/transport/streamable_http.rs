//! MCP over Streamable HTTP, backed by `rmcp`.

use crate::config::TransportConfig;
use crate::tool_registry::{
    domain::{ProviderUrl, RemoteToolDescriptor},
    ports::{DiscoveryError, DiscoveryResult, ToolChannel},
};
use async_trait::async_trait;
use rmcp::{
    RoleClient, ServiceExt,
    model::{ClientInfo, Tool},
    service::{ClientInitializeError, RunningService, ServiceError},
    transport::{
        StreamableHttpClientTransport, streamable_http_client::StreamableHttpClientTransportConfig,
    },
};
use std::time::Duration;
use tracing::debug;

type HttpSession = RunningService<RoleClient, ClientInfo>;

/// Open request/response session with one provider.
pub struct StreamableHttpChannel {
    session: Option<HttpSession>,
    request_timeout: Duration,
}

impl StreamableHttpChannel {
    /// Performs the `initialize` handshake against `url`.
    ///
    /// `http` must already carry the provider's headers as defaults, so they
    /// are attached to every call.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Connection`] when the handshake fails or the
    /// connect timeout elapses.
    pub async fn connect(
        http: reqwest::Client,
        url: &ProviderUrl,
        config: &TransportConfig,
    ) -> DiscoveryResult<Self> {
        let transport = StreamableHttpClientTransport::with_client(
            http,
            StreamableHttpClientTransportConfig::with_uri(url.as_str().to_owned()),
        );
        let handshake = client_info(config).serve(transport);
        let session = tokio::time::timeout(config.connect_timeout(), handshake)
            .await
            .map_err(|_| {
                DiscoveryError::Connection(format!(
                    "timed out after {}s connecting to {url}",
                    config.connect_timeout().as_secs()
                ))
            })?
            .map_err(map_initialize_error)?;
        debug!(url = %url, "streamable HTTP session initialized");

        Ok(Self {
            session: Some(session),
            request_timeout: config.request_timeout(),
        })
    }
}

fn client_info(config: &TransportConfig) -> ClientInfo {
    let mut info = ClientInfo::default();
    info.client_info.name = config.client_name().to_owned();
    info.client_info.version = config.client_version().to_owned();
    info
}

fn map_initialize_error(error: ClientInitializeError) -> DiscoveryError {
    DiscoveryError::Connection(format!("handshake failed: {error}"))
}

fn map_service_error(error: ServiceError) -> DiscoveryError {
    match error {
        ServiceError::McpError(error) => DiscoveryError::Protocol(format!(
            "remote returned error {}: {}",
            error.code.0, error.message
        )),
        ServiceError::UnexpectedResponse => {
            DiscoveryError::Protocol("unexpected response to tools/list".to_owned())
        }
        other => DiscoveryError::connection(other),
    }
}

fn descriptor(tool: Tool) -> RemoteToolDescriptor {
    RemoteToolDescriptor::new(
        tool.name.to_string(),
        tool.description.map(|text| text.to_string()),
    )
}

#[async_trait]
impl ToolChannel for StreamableHttpChannel {
    async fn list_tools(&mut self) -> DiscoveryResult<Vec<RemoteToolDescriptor>> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| DiscoveryError::Connection("channel closed".to_owned()))?;

        let listing = async {
            match session.list_all_tools().await {
                Err(ServiceError::UnexpectedResponse) => {
                    session.list_tools(None).await.map(|page| page.tools)
                }
                other => other,
            }
        };
        let tools = tokio::time::timeout(self.request_timeout, listing)
            .await
            .map_err(|_| {
                DiscoveryError::Connection(format!(
                    "tools/list timed out after {}s",
                    self.request_timeout.as_secs()
                ))
            })?
            .map_err(map_service_error)?;

        Ok(tools.into_iter().map(descriptor).collect())
    }

    async fn close(&mut self) -> DiscoveryResult<()> {
        if let Some(session) = self.session.take() {
            session.cancel().await.map_err(DiscoveryError::connection)?;
            debug!("streamable HTTP session closed");
        }
        Ok(())
    }
}
