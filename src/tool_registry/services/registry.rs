//! Provider registry backed by a blob-store shadow.

use crate::config::RegistryConfig;
use crate::tool_registry::{
    domain::{
        PersistedProvider, ProviderDomainError, ProviderDraft, ProviderId, ServerSpec,
        SettingsChange, ToolProvider, migrate_records,
    },
    ports::BlobStore,
};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Service-level errors for registry mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderRegistryError {
    /// The draft failed validation; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ProviderDomainError),

    /// No provider exists with the given identifier.
    #[error("MCP server {0} not found")]
    NotFound(ProviderId),
}

/// Result type for registry operations.
pub type ProviderRegistryResult<T> = Result<T, ProviderRegistryError>;

/// Outcome of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUpdate {
    /// Provider as it is after the update.
    pub provider: ToolProvider,
    /// What changed relative to the previous settings.
    pub change: SettingsChange,
}

/// Process-wide set of configured providers.
///
/// The in-memory set is authoritative. After every mutation the full set is
/// written to the blob store; storage failures are logged and never undo the
/// mutation.
pub struct ProviderRegistry<S>
where
    S: BlobStore,
{
    store: Arc<S>,
    config: RegistryConfig,
    providers: RwLock<Vec<ToolProvider>>,
    write_order: Mutex<()>,
}

impl<S> ProviderRegistry<S>
where
    S: BlobStore,
{
    /// Creates an empty registry without reading the store.
    #[must_use]
    pub fn new(store: Arc<S>, config: RegistryConfig) -> Self {
        Self::with_providers(store, config, Vec::new())
    }

    fn with_providers(store: Arc<S>, config: RegistryConfig, providers: Vec<ToolProvider>) -> Self {
        Self {
            store,
            config,
            providers: RwLock::new(providers),
            write_order: Mutex::new(()),
        }
    }

    /// Builds a registry from whatever the store currently holds.
    ///
    /// An unreadable or corrupt blob yields an empty registry. Records that
    /// lack a transport kind load as streaming providers; invalid and
    /// duplicate records are skipped. The stored bytes are left as they are.
    pub async fn load(store: Arc<S>, config: RegistryConfig) -> Self {
        let key = config.storage_key();
        let records = match store.read(key).await {
            Ok(Some(blob)) => serde_json::from_str::<Vec<PersistedProvider>>(&blob)
                .unwrap_or_else(|err| {
                    warn!(storage_key = key, error = %err, "discarding unparseable provider blob");
                    Vec::new()
                }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(storage_key = key, error = %err, "failed to read provider blob");
                Vec::new()
            }
        };

        let migrated = migrate_records(records);
        for skipped in &migrated.skipped {
            warn!(
                storage_key = key,
                provider_id = %skipped.id,
                reason = %skipped.reason,
                "skipping persisted provider record"
            );
        }
        info!(
            storage_key = key,
            count = migrated.providers.len(),
            "loaded provider registry"
        );
        Self::with_providers(store, config, migrated.providers)
    }

    /// Returns the providers in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<ToolProvider> {
        self.read_providers().clone()
    }

    /// Finds a provider by identifier.
    #[must_use]
    pub fn get(&self, id: &ProviderId) -> Option<ToolProvider> {
        self.read_providers()
            .iter()
            .find(|provider| provider.id() == id)
            .cloned()
    }

    /// Projects every provider into the chat request `mcpServers` shape.
    #[must_use]
    pub fn server_specs(&self) -> Vec<ServerSpec> {
        self.read_providers()
            .iter()
            .map(ToolProvider::server_spec)
            .collect()
    }

    /// Validates and appends a new provider with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderRegistryError::Validation`] when the draft is invalid.
    pub async fn register(&self, draft: ProviderDraft) -> ProviderRegistryResult<ToolProvider> {
        let settings = draft.validate()?;
        let _ordered = self.write_order.lock().await;

        let (provider, snapshot) = {
            let mut providers = self.write_providers();
            let id = fresh_id(&providers);
            let provider = ToolProvider::new(id, settings);
            providers.push(provider.clone());
            (provider, persisted(&providers))
        };
        info!(
            provider_id = %provider.id(),
            name = %provider.name(),
            url = %provider.url(),
            transport = %provider.transport_kind(),
            "registered provider"
        );

        self.persist(snapshot).await;
        Ok(provider)
    }

    /// Replaces the mutable fields of an existing provider, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderRegistryError::Validation`] when the draft is invalid
    /// or [`ProviderRegistryError::NotFound`] when no provider has `id`.
    pub async fn update(
        &self,
        id: &ProviderId,
        draft: ProviderDraft,
    ) -> ProviderRegistryResult<ProviderUpdate> {
        self.update_then(id, draft, |_| {}).await
    }

    /// Like [`Self::update`], running `applied` once the in-memory set holds
    /// the new settings and before the blob store is written.
    ///
    /// `applied` runs synchronously, so no other task can observe the new
    /// settings before it returns.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderRegistryError::Validation`] when the draft is invalid
    /// or [`ProviderRegistryError::NotFound`] when no provider has `id`.
    pub async fn update_then<F>(
        &self,
        id: &ProviderId,
        draft: ProviderDraft,
        applied: F,
    ) -> ProviderRegistryResult<ProviderUpdate>
    where
        F: FnOnce(&ProviderUpdate) + Send,
    {
        let settings = draft.validate()?;
        let _ordered = self.write_order.lock().await;

        let (update, snapshot) = {
            let mut providers = self.write_providers();
            let provider = providers
                .iter_mut()
                .find(|provider| provider.id() == id)
                .ok_or_else(|| ProviderRegistryError::NotFound(id.clone()))?;
            let change = provider.apply(settings);
            let update = ProviderUpdate {
                provider: provider.clone(),
                change,
            };
            (update, persisted(&providers))
        };
        applied(&update);
        info!(
            provider_id = %id,
            url = %update.provider.url(),
            connection_changed = update.change.connection_changed,
            "updated provider"
        );

        self.persist(snapshot).await;
        Ok(update)
    }

    /// Removes a provider, returning it when it existed.
    ///
    /// Removing an unknown identifier is a no-op and writes nothing.
    pub async fn remove(&self, id: &ProviderId) -> Option<ToolProvider> {
        self.remove_then(id, |_| {}).await
    }

    /// Like [`Self::remove`], running `removed` after the provider leaves the
    /// in-memory set and before the blob store is written.
    pub async fn remove_then<F>(&self, id: &ProviderId, removed: F) -> Option<ToolProvider>
    where
        F: FnOnce(&ToolProvider) + Send,
    {
        let _ordered = self.write_order.lock().await;

        let (provider, snapshot) = {
            let mut providers = self.write_providers();
            let index = providers.iter().position(|provider| provider.id() == id)?;
            let provider = providers.remove(index);
            (provider, persisted(&providers))
        };
        removed(&provider);
        info!(provider_id = %id, name = %provider.name(), "removed provider");

        self.persist(snapshot).await;
        Some(provider)
    }

    async fn persist(&self, snapshot: Vec<PersistedProvider>) {
        let key = self.config.storage_key();
        if snapshot.is_empty() {
            if let Err(err) = self.store.remove(key).await {
                warn!(storage_key = key, error = %err, "failed to clear provider blob");
            }
            return;
        }

        let blob = match serde_json::to_string(&snapshot) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(storage_key = key, error = %err, "failed to serialize providers");
                return;
            }
        };
        if let Err(err) = self.store.write(key, &blob).await {
            warn!(storage_key = key, error = %err, "failed to write provider blob");
        }
    }

    fn read_providers(&self) -> std::sync::RwLockReadGuard<'_, Vec<ToolProvider>> {
        self.providers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_providers(&self) -> std::sync::RwLockWriteGuard<'_, Vec<ToolProvider>> {
        self.providers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn fresh_id(providers: &[ToolProvider]) -> ProviderId {
    loop {
        let candidate = ProviderId::new();
        if providers.iter().all(|provider| provider.id() != &candidate) {
            return candidate;
        }
    }
}

fn persisted(providers: &[ToolProvider]) -> Vec<PersistedProvider> {
    providers.iter().map(ToolProvider::to_persisted).collect()
}
