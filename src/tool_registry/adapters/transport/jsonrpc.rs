//! Minimal JSON-RPC 2.0 envelopes for the MCP event-stream transport.

use crate::tool_registry::{domain::RemoteToolDescriptor, ports::DiscoveryError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Protocol revision spoken over the event-stream transport.
pub(super) const SSE_PROTOCOL_VERSION: &str = "2024-11-05";

const JSONRPC_VERSION: &str = "2.0";

/// Outbound request or notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct JsonRpcRequest {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

impl JsonRpcRequest {
    pub(super) fn call(id: u64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Some(id),
            method: method.to_owned(),
            params: Some(params),
        }
    }

    pub(super) fn notification(method: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: None,
            method: method.to_owned(),
            params: None,
        }
    }
}

/// Any inbound message: response, server request or notification.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct JsonRpcMessage {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

impl JsonRpcMessage {
    /// Extracts the result if this message answers request `id`.
    ///
    /// Returns `Ok(None)` for unrelated traffic.
    pub(super) fn into_result_for(self, id: u64) -> Result<Option<Value>, DiscoveryError> {
        if self.method.is_some() || self.id.as_ref().and_then(Value::as_u64) != Some(id) {
            return Ok(None);
        }
        if let Some(error) = self.error {
            return Err(DiscoveryError::Protocol(format!(
                "remote returned error {}: {}",
                error.code, error.message
            )));
        }
        Ok(Some(self.result.unwrap_or(Value::Null)))
    }
}

/// One page of a `tools/list` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ToolsPage {
    pub(super) tools: Vec<RemoteToolDescriptor>,
    #[serde(default)]
    pub(super) next_cursor: Option<String>,
}

pub(super) fn initialize_params(client_name: &str, client_version: &str) -> Value {
    json!({
        "protocolVersion": SSE_PROTOCOL_VERSION,
        "capabilities": {},
        "clientInfo": {
            "name": client_name,
            "version": client_version,
        },
    })
}

pub(super) fn list_tools_params(cursor: Option<&str>) -> Value {
    cursor.map_or_else(|| json!({}), |value| json!({ "cursor": value }))
}
