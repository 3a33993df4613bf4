//! Channel ports for reaching remote tool providers.

use crate::tool_registry::domain::{ChannelTarget, RemoteToolDescriptor};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for channel and discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Open session with one remote provider.
#[async_trait]
pub trait ToolChannel: Send {
    /// Requests the remote tool catalog in the order the remote reports it.
    async fn list_tools(&mut self) -> DiscoveryResult<Vec<RemoteToolDescriptor>>;

    /// Ends the session. Closing twice is a no-op.
    async fn close(&mut self) -> DiscoveryResult<()>;
}

/// Builds the channel matching a target's transport.
///
/// Implementations are the single place where transport kinds are told apart.
#[async_trait]
pub trait ChannelOpener: Send + Sync {
    /// Opens a session against `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Connection`] when the remote is unreachable or
    /// rejects the handshake.
    async fn open(&self, target: &ChannelTarget) -> DiscoveryResult<Box<dyn ToolChannel>>;
}

/// Failure to discover tools on a provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The transport could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The remote answered but the catalog could not be read.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl DiscoveryError {
    /// Creates a connection error from any displayable cause.
    pub fn connection(cause: impl std::fmt::Display) -> Self {
        Self::Connection(cause.to_string())
    }

    /// Creates a protocol error from any displayable cause.
    pub fn protocol(cause: impl std::fmt::Display) -> Self {
        Self::Protocol(cause.to_string())
    }
}
