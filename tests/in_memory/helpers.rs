//! Shared test helpers for in-memory integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::fixture;
use toolport::{
    config::{CacheConfig, RegistryConfig},
    tool_registry::{
        adapters::{ManualClock, memory::InMemoryBlobStore},
        domain::{DiscoveredTool, ProviderUrl, ToolProvider},
        ports::{DiscoveryError, DiscoveryResult, ToolDiscovery},
        services::{ProviderCoordinator, ProviderRegistry, ToolCache},
    },
};

/// Coordinator wired with in-memory collaborators.
pub type TestCoordinator = ProviderCoordinator<InMemoryBlobStore, ScriptedDiscovery, ManualClock>;

/// Discovery double that replays queued responses and records each call.
#[derive(Debug, Default)]
pub struct ScriptedDiscovery {
    responses: Mutex<Vec<DiscoveryResult<Vec<DiscoveredTool>>>>,
    calls: Mutex<Vec<ProviderUrl>>,
}

impl ScriptedDiscovery {
    /// Queues a response for the next call.
    pub fn push(&self, response: DiscoveryResult<Vec<DiscoveredTool>>) {
        self.responses
            .lock()
            .expect("responses lock")
            .push(response);
    }

    /// Returns the URLs discovery was invoked for, in call order.
    pub fn calls(&self) -> Vec<ProviderUrl> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ToolDiscovery for ScriptedDiscovery {
    async fn discover(&self, provider: &ToolProvider) -> DiscoveryResult<Vec<DiscoveredTool>> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(provider.url().clone());
        let mut responses = self.responses.lock().expect("responses lock");
        if responses.is_empty() {
            return Err(DiscoveryError::Connection("no scripted response".to_owned()));
        }
        responses.remove(0)
    }
}

/// Everything a test needs to drive and observe a coordinator.
pub struct TestContext {
    /// Store shared with the coordinator's registry.
    pub store: InMemoryBlobStore,
    /// Clock shared with the coordinator's cache.
    pub clock: ManualClock,
    /// Discovery double shared with the coordinator.
    pub discovery: Arc<ScriptedDiscovery>,
    /// Coordinator under test.
    pub coordinator: TestCoordinator,
}

impl TestContext {
    /// Builds a coordinator over the given store, loading whatever it holds.
    pub async fn over(store: InMemoryBlobStore) -> Self {
        let clock = ManualClock::default();
        let discovery = Arc::new(ScriptedDiscovery::default());
        let registry =
            ProviderRegistry::load(Arc::new(store.clone()), RegistryConfig::default()).await;
        let coordinator = ProviderCoordinator::new(
            registry,
            ToolCache::new(CacheConfig::default(), Arc::new(clock.clone())),
            Arc::clone(&discovery),
        );
        Self {
            store,
            clock,
            discovery,
            coordinator,
        }
    }
}

/// Provides a store with no configured providers.
#[fixture]
pub fn store() -> InMemoryBlobStore {
    InMemoryBlobStore::new()
}

/// Builds a tool list from `(name, description)` pairs.
pub fn tools(pairs: &[(&str, Option<&str>)]) -> Vec<DiscoveredTool> {
    pairs
        .iter()
        .map(|(name, description)| DiscoveredTool::new(*name, description.map(str::to_owned)))
        .collect()
}
