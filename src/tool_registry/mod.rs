//! Registry of remote MCP tool providers and on-demand tool discovery.
//!
//! Providers are configured by the user, held in memory and shadowed to a
//! blob store. Their tool catalogs are fetched over the provider's transport
//! when requested and cached per endpoint URL for a bounded window. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
