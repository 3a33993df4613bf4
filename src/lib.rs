//! Toolport: client-side registry and discovery layer for MCP tool providers.
//!
//! This crate keeps the list of remote tool providers a user has configured,
//! persists it to a pluggable blob store, and fetches each provider's tool
//! catalog over server-sent events or Streamable HTTP, caching results per
//! endpoint.
//!
//! # Architecture
//!
//! Toolport follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, transports)
//!
//! # Modules
//!
//! - [`tool_registry`]: Provider registry, tool discovery and result caching
//! - [`config`]: Runtime configuration with environment overrides

pub mod config;
pub mod tool_registry;
