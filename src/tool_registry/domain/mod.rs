//! Domain model for tool providers and tool discovery.
//!
//! The tool registry domain models provider identity, endpoint and transport
//! configuration, the persisted record shape with its legacy migration, and
//! discovered tool metadata. Infrastructure concerns remain outside this
//! boundary.

mod cache;
mod error;
mod header;
mod ids;
mod provider;
mod tool;
mod transport;

pub use cache::ToolCacheEntry;
pub use error::{ParseTransportKindError, ProviderDomainError};
pub use header::{HeaderSet, RequestHeader};
pub use ids::{ProviderId, ProviderName, ProviderUrl};
pub use provider::{
    MigratedRecords, PersistedProvider, ProviderDraft, ProviderSettings, ServerSpec,
    SettingsChange, SkippedRecord, ToolProvider, migrate_records,
};
pub use tool::{DEFAULT_TOOL_DESCRIPTION, DiscoveredTool, RemoteToolDescriptor};
pub use transport::{ChannelTarget, ProviderTransport, TransportKind};
