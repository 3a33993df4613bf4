//! Port contracts for provider persistence and tool discovery.

mod channel;
mod discovery;
mod store;

pub use channel::{ChannelOpener, DiscoveryError, DiscoveryResult, ToolChannel};
pub use discovery::ToolDiscovery;
pub use store::{BlobStore, StoreError, StoreResult};
