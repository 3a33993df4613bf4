//! MCP over a server-sent event stream.
//!
//! The client holds a `GET` event stream open. The server's first `endpoint`
//! event names the URL that accepts JSON-RPC messages via `POST`; responses
//! come back on the event stream as `message` events.

use super::jsonrpc::{self, JsonRpcMessage, JsonRpcRequest, ToolsPage};
use crate::config::TransportConfig;
use crate::tool_registry::{
    domain::{ProviderUrl, RemoteToolDescriptor},
    ports::{DiscoveryError, DiscoveryResult, ToolChannel},
};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Url;
use reqwest_eventsource::{Event, EventSource};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Upper bound on catalog pages, guarding against cursor loops.
const MAX_CATALOG_PAGES: usize = 100;

/// Open event-stream session with one provider.
pub struct SseChannel {
    http: reqwest::Client,
    events: EventSource,
    endpoint: Url,
    next_id: u64,
    request_timeout: Duration,
    closed: bool,
}

impl SseChannel {
    /// Opens the event stream, waits for the message endpoint and completes
    /// the `initialize` handshake.
    ///
    /// `http` must already carry the provider's headers as defaults; they are
    /// sent with the stream request and with every posted message.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Connection`] when the stream cannot be
    /// opened, no endpoint is announced, the handshake is rejected, or the
    /// connect timeout elapses.
    pub async fn connect(
        http: reqwest::Client,
        url: &ProviderUrl,
        config: &TransportConfig,
    ) -> DiscoveryResult<Self> {
        let base = Url::parse(url.as_str()).map_err(DiscoveryError::connection)?;
        let events = EventSource::new(http.get(base.clone())).map_err(DiscoveryError::connection)?;

        let handshake = async {
            let mut events = events;
            let endpoint = wait_for_endpoint(&mut events, &base).await?;
            debug!(url = %base, endpoint = %endpoint, "event stream announced endpoint");
            let mut channel = Self {
                http,
                events,
                endpoint,
                next_id: 0,
                request_timeout: config.request_timeout(),
                closed: false,
            };
            channel
                .initialize(config.client_name(), config.client_version())
                .await?;
            Ok(channel)
        };

        tokio::time::timeout(config.connect_timeout(), handshake)
            .await
            .map_err(|_| {
                DiscoveryError::Connection(format!(
                    "timed out after {}s connecting to {base}",
                    config.connect_timeout().as_secs()
                ))
            })?
    }

    async fn initialize(&mut self, client_name: &str, client_version: &str) -> DiscoveryResult<()> {
        let params = jsonrpc::initialize_params(client_name, client_version);
        self.call("initialize", params).await.map_err(|err| match err {
            DiscoveryError::Protocol(message) => {
                DiscoveryError::Connection(format!("handshake rejected: {message}"))
            }
            other => other,
        })?;
        post(
            &self.http,
            &self.endpoint,
            &JsonRpcRequest::notification("notifications/initialized"),
        )
        .await
    }

    async fn call(&mut self, method: &str, params: Value) -> DiscoveryResult<Value> {
        let id = self.next_id;
        self.next_id += 1;
        post(
            &self.http,
            &self.endpoint,
            &JsonRpcRequest::call(id, method, params),
        )
        .await?;
        self.await_result(id).await
    }

    async fn await_result(&mut self, id: u64) -> DiscoveryResult<Value> {
        while let Some(event) = self.events.next().await {
            let message = match event {
                Ok(Event::Open) => continue,
                Ok(Event::Message(message)) => message,
                Err(err) => return Err(DiscoveryError::connection(err)),
            };
            if !message.event.is_empty() && message.event != "message" {
                continue;
            }
            let envelope: JsonRpcMessage =
                serde_json::from_str(&message.data).map_err(DiscoveryError::protocol)?;
            if let Some(result) = envelope.into_result_for(id)? {
                return Ok(result);
            }
        }
        Err(DiscoveryError::Connection(
            "event stream closed before the response arrived".to_owned(),
        ))
    }

    async fn list_page(&mut self, cursor: Option<&str>) -> DiscoveryResult<ToolsPage> {
        let request_timeout = self.request_timeout;
        let result = tokio::time::timeout(
            request_timeout,
            self.call("tools/list", jsonrpc::list_tools_params(cursor)),
        )
        .await
        .map_err(|_| {
            DiscoveryError::Connection(format!(
                "tools/list timed out after {}s",
                request_timeout.as_secs()
            ))
        })??;
        serde_json::from_value(result).map_err(DiscoveryError::protocol)
    }
}

async fn post(
    http: &reqwest::Client,
    endpoint: &Url,
    message: &JsonRpcRequest,
) -> DiscoveryResult<()> {
    let response = http
        .post(endpoint.clone())
        .json(message)
        .send()
        .await
        .map_err(DiscoveryError::connection)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DiscoveryError::Connection(format!(
            "message endpoint answered with status {status}"
        )));
    }
    Ok(())
}

async fn wait_for_endpoint(events: &mut EventSource, base: &Url) -> DiscoveryResult<Url> {
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Message(message)) if message.event == "endpoint" => {
                return base.join(message.data.trim()).map_err(|err| {
                    DiscoveryError::Connection(format!(
                        "invalid message endpoint '{}': {err}",
                        message.data
                    ))
                });
            }
            Ok(_) => {}
            Err(err) => {
                events.close();
                return Err(DiscoveryError::connection(err));
            }
        }
    }
    Err(DiscoveryError::Connection(
        "event stream closed before announcing an endpoint".to_owned(),
    ))
}

#[async_trait]
impl ToolChannel for SseChannel {
    async fn list_tools(&mut self) -> DiscoveryResult<Vec<RemoteToolDescriptor>> {
        if self.closed {
            return Err(DiscoveryError::Connection("channel closed".to_owned()));
        }

        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        for _ in 0..MAX_CATALOG_PAGES {
            let page = self.list_page(cursor.as_deref()).await?;
            tools.extend(page.tools);
            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => return Ok(tools),
            }
        }
        Err(DiscoveryError::Protocol(format!(
            "tool catalog exceeded {MAX_CATALOG_PAGES} pages"
        )))
    }

    async fn close(&mut self) -> DiscoveryResult<()> {
        if !self.closed {
            self.closed = true;
            self.events.close();
            debug!(endpoint = %self.endpoint, "event stream closed");
        }
        Ok(())
    }
}
