//! Application services for the provider registry, discovery and caching.

mod actions;
mod cache;
mod coordinator;
mod discovery;
mod registry;

pub use actions::{ActionOutcome, ActionStatus, ProviderAction};
pub use cache::ToolCache;
pub use coordinator::{CoordinatorError, CoordinatorResult, ProviderCoordinator};
pub use discovery::ToolDiscoveryClient;
pub use registry::{
    ProviderRegistry, ProviderRegistryError, ProviderRegistryResult, ProviderUpdate,
};
