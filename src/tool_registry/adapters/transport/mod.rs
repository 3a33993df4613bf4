//! Remote transports reaching MCP tool providers over the network.
//!
//! Streaming providers are reached over a server-sent event stream with a
//! companion message endpoint. Request/response providers are reached over
//! Streamable HTTP. [`RemoteChannelOpener`] picks between them.

mod headers;
mod jsonrpc;
mod selector;
mod sse;
mod streamable_http;

pub use selector::RemoteChannelOpener;
pub use sse::SseChannel;
pub use streamable_http::StreamableHttpChannel;
