//! Coordination of registry mutations, tool discovery and cache upkeep.

use super::{
    ActionOutcome, ProviderAction, ProviderRegistry, ProviderRegistryError, ToolCache,
    ToolDiscoveryClient,
};
use crate::config::ToolportConfig;
use crate::tool_registry::{
    adapters::RemoteChannelOpener,
    domain::{DiscoveredTool, ProviderDraft, ProviderId, ProviderName, ServerSpec, ToolProvider},
    ports::{BlobStore, DiscoveryError, ToolDiscovery},
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for coordinated provider operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    /// A registry mutation was rejected.
    #[error(transparent)]
    Registry(#[from] ProviderRegistryError),

    /// No provider exists with the given identifier.
    #[error("MCP server {0} not found")]
    NotFound(ProviderId),

    /// The provider could not be queried for its tools.
    #[error("failed to fetch tools from \"{provider}\": {source}")]
    Discovery {
        /// Name of the provider that was queried.
        provider: ProviderName,
        /// Underlying discovery failure.
        #[source]
        source: DiscoveryError,
    },
}

/// Result type for coordinator operations.
pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Ties registry mutations to cache invalidation and serves tool expansion.
///
/// The cache is keyed by endpoint URL, so providers sharing a URL share one
/// entry. Overlapping expansions of the same URL are not merged; whichever
/// finishes last stores its result.
pub struct ProviderCoordinator<S, D, C>
where
    S: BlobStore,
    D: ToolDiscovery,
    C: Clock + Send + Sync,
{
    registry: ProviderRegistry<S>,
    cache: ToolCache<C>,
    discovery: Arc<D>,
}

impl<S, D, C> ProviderCoordinator<S, D, C>
where
    S: BlobStore,
    D: ToolDiscovery,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator from its collaborators.
    #[must_use]
    pub const fn new(
        registry: ProviderRegistry<S>,
        cache: ToolCache<C>,
        discovery: Arc<D>,
    ) -> Self {
        Self {
            registry,
            cache,
            discovery,
        }
    }

    /// Returns the provider registry.
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry<S> {
        &self.registry
    }

    /// Returns the discovery cache.
    #[must_use]
    pub const fn cache(&self) -> &ToolCache<C> {
        &self.cache
    }

    /// Returns the providers in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<ToolProvider> {
        self.registry.list()
    }

    /// Projects every provider into the chat request `mcpServers` shape.
    #[must_use]
    pub fn server_specs(&self) -> Vec<ServerSpec> {
        self.registry.server_specs()
    }

    /// Registers a new provider.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Registry`] when the draft is invalid.
    pub async fn register(&self, draft: ProviderDraft) -> CoordinatorResult<ToolProvider> {
        Ok(self.registry.register(draft).await?)
    }

    /// Updates a provider, invalidating the cache entry of its previous URL
    /// when the URL, transport kind or headers changed.
    ///
    /// The entry is dropped before the registry is persisted, so an `expand`
    /// racing the store write never sees results fetched with old settings.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Registry`] when the draft is invalid or the
    /// provider does not exist.
    pub async fn update(
        &self,
        id: &ProviderId,
        draft: ProviderDraft,
    ) -> CoordinatorResult<ToolProvider> {
        let update = self
            .registry
            .update_then(id, draft, |update| {
                if update.change.connection_changed {
                    self.cache.invalidate(&update.change.previous_url);
                }
            })
            .await?;
        Ok(update.provider)
    }

    /// Removes a provider and its cache entry. Unknown identifiers are ignored.
    pub async fn remove(&self, id: &ProviderId) -> Option<ToolProvider> {
        self.registry
            .remove_then(id, |removed| self.cache.invalidate(removed.url()))
            .await
    }

    /// Returns the tools of a provider, from the cache when fresh.
    ///
    /// Only successful discoveries are cached; a failure leaves the cache as
    /// it was so the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::NotFound`] for an unknown provider and
    /// [`CoordinatorError::Discovery`] when the provider cannot be queried.
    pub async fn expand(&self, id: &ProviderId) -> CoordinatorResult<Vec<DiscoveredTool>> {
        let provider = self
            .registry
            .get(id)
            .ok_or_else(|| CoordinatorError::NotFound(id.clone()))?;
        if let Some(tools) = self.cache.get(provider.url()) {
            return Ok(tools);
        }

        debug!(provider_id = %id, url = %provider.url(), "discovering provider tools");
        let tools = self
            .discovery
            .discover(&provider)
            .await
            .map_err(|source| CoordinatorError::Discovery {
                provider: provider.name().clone(),
                source,
            })?;
        info!(
            provider_id = %id,
            url = %provider.url(),
            count = tools.len(),
            "discovered provider tools"
        );
        self.cache.put(provider.url(), tools.clone());
        Ok(tools)
    }

    /// Runs a user action and describes its result for display.
    pub async fn dispatch(&self, action: ProviderAction) -> ActionOutcome {
        match action {
            ProviderAction::Register(draft) => {
                let name = draft.name.clone();
                match self.register(draft).await {
                    Ok(provider) => mutation_succeeded(provider, "registered"),
                    Err(err) => mutation_failed("register", &name, &err),
                }
            }
            ProviderAction::Update { id, draft } => {
                let name = draft.name.clone();
                match self.update(&id, draft).await {
                    Ok(provider) => mutation_succeeded(provider, "updated"),
                    Err(err) => mutation_failed("update", &name, &err),
                }
            }
            ProviderAction::Remove { id, name } => {
                let removed = self.remove(&id).await;
                ActionOutcome::success(format!("MCP server \"{name}\" deleted successfully"))
                    .with_provider(removed)
            }
            ProviderAction::Expand { provider_id } => self.dispatch_expand(&provider_id).await,
        }
    }

    async fn dispatch_expand(&self, id: &ProviderId) -> ActionOutcome {
        match self.expand(id).await {
            Ok(tools) => {
                let name = self
                    .registry
                    .get(id)
                    .map_or_else(|| id.to_string(), |provider| provider.name().to_string());
                ActionOutcome::success(format!("Loaded {} tools from \"{name}\"", tools.len()))
                    .with_tools(tools)
            }
            Err(CoordinatorError::Discovery { provider, source }) => ActionOutcome::failure(
                format!("Failed to fetch tools from \"{provider}\": {source}"),
            ),
            Err(err) => {
                ActionOutcome::failure(format!("Failed to fetch tools from \"{id}\": {err}"))
            }
        }
    }
}

fn mutation_succeeded(provider: ToolProvider, verb: &str) -> ActionOutcome {
    ActionOutcome::success(format!(
        "MCP server \"{}\" {verb} successfully",
        provider.name()
    ))
    .with_provider(Some(provider))
}

fn mutation_failed(verb: &str, name: &str, err: &CoordinatorError) -> ActionOutcome {
    ActionOutcome::failure(format!("Failed to {verb} MCP server \"{name}\": {err}"))
}

impl<S> ProviderCoordinator<S, ToolDiscoveryClient<RemoteChannelOpener>, DefaultClock>
where
    S: BlobStore,
{
    /// Wires a coordinator with the remote transports and the system clock,
    /// loading the registry from `store`.
    pub async fn bootstrap(store: Arc<S>, config: ToolportConfig) -> Self {
        let ToolportConfig {
            registry,
            cache,
            transport,
        } = config;
        Self::new(
            ProviderRegistry::load(store, registry).await,
            ToolCache::new(cache, Arc::new(DefaultClock)),
            Arc::new(ToolDiscoveryClient::new(RemoteChannelOpener::new(transport))),
        )
    }
}
