//! Tool provider aggregate root and its persisted record shape.

use super::{
    ChannelTarget, HeaderSet, ProviderDomainError, ProviderId, ProviderName, ProviderTransport,
    ProviderUrl, RequestHeader, TransportKind,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unvalidated register/update payload, as entered by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDraft {
    /// Display label.
    pub name: String,
    /// Endpoint URL.
    pub url: String,
    /// Wire mechanism.
    pub transport_kind: TransportKind,
    /// Raw header pairs; incomplete pairs are dropped during validation.
    pub headers: Vec<RequestHeader>,
}

impl ProviderDraft {
    /// Creates a draft using the streaming transport and no headers.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            transport_kind: TransportKind::default(),
            headers: Vec::new(),
        }
    }

    /// Sets the transport kind.
    #[must_use]
    pub const fn with_transport(mut self, transport_kind: TransportKind) -> Self {
        self.transport_kind = transport_kind;
        self
    }

    /// Replaces the header pairs.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = RequestHeader>) -> Self {
        self.headers = headers.into_iter().collect();
        self
    }

    /// Appends one header pair.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(RequestHeader::new(key, value));
        self
    }

    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError`] when the name or URL is invalid or a
    /// retained header is oversized.
    pub fn validate(self) -> Result<ProviderSettings, ProviderDomainError> {
        Ok(ProviderSettings {
            name: ProviderName::new(self.name)?,
            url: ProviderUrl::new(self.url)?,
            transport_kind: self.transport_kind,
            headers: HeaderSet::new(self.headers)?,
        })
    }
}

impl From<&ToolProvider> for ProviderDraft {
    fn from(provider: &ToolProvider) -> Self {
        Self {
            name: provider.name.as_str().to_owned(),
            url: provider.url.as_str().to_owned(),
            transport_kind: provider.transport_kind,
            headers: provider.headers.as_slice().to_vec(),
        }
    }
}

/// Validated mutable fields of a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Display label.
    pub name: ProviderName,
    /// Endpoint URL.
    pub url: ProviderUrl,
    /// Wire mechanism.
    pub transport_kind: TransportKind,
    /// Complete header pairs.
    pub headers: HeaderSet,
}

/// Effect of applying new settings to an existing provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange {
    /// URL the provider had before the update.
    pub previous_url: ProviderUrl,
    /// Whether the URL, transport kind or headers changed.
    pub connection_changed: bool,
}

/// Configured remote endpoint exposing callable tools.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolProvider {
    id: ProviderId,
    name: ProviderName,
    url: ProviderUrl,
    transport_kind: TransportKind,
    headers: HeaderSet,
}

impl ToolProvider {
    /// Creates a provider with the given identity and settings.
    #[must_use]
    pub fn new(id: ProviderId, settings: ProviderSettings) -> Self {
        let ProviderSettings {
            name,
            url,
            transport_kind,
            headers,
        } = settings;
        Self {
            id,
            name,
            url,
            transport_kind,
            headers,
        }
    }

    /// Returns the provider identifier.
    #[must_use]
    pub const fn id(&self) -> &ProviderId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ProviderName {
        &self.name
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn url(&self) -> &ProviderUrl {
        &self.url
    }

    /// Returns the transport kind.
    #[must_use]
    pub const fn transport_kind(&self) -> TransportKind {
        self.transport_kind
    }

    /// Returns the header set.
    #[must_use]
    pub const fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Returns where and how to open a channel to this provider.
    #[must_use]
    pub fn channel_target(&self) -> ChannelTarget {
        ChannelTarget::new(
            self.url.clone(),
            ProviderTransport::new(self.transport_kind, self.headers.clone()),
        )
    }

    /// Replaces every mutable field in place, keeping the identifier.
    pub fn apply(&mut self, settings: ProviderSettings) -> SettingsChange {
        let connection_changed = self.url != settings.url
            || self.transport_kind != settings.transport_kind
            || self.headers != settings.headers;
        let previous_url = std::mem::replace(&mut self.url, settings.url);
        self.name = settings.name;
        self.transport_kind = settings.transport_kind;
        self.headers = settings.headers;
        SettingsChange {
            previous_url,
            connection_changed,
        }
    }

    /// Projects the provider into the shape accepted by chat requests.
    #[must_use]
    pub fn server_spec(&self) -> ServerSpec {
        ServerSpec {
            name: self.name.clone(),
            url: self.url.clone(),
            transport_type: self.transport_kind,
            headers: self.headers.clone(),
        }
    }

    /// Converts the provider into its persisted record.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedProvider {
        PersistedProvider {
            id: self.id.as_str().to_owned(),
            name: self.name.as_str().to_owned(),
            url: self.url.as_str().to_owned(),
            transport_type: Some(self.transport_kind),
            headers: self.headers.as_slice().to_vec(),
        }
    }
}

/// Provider entry of a chat request's `mcpServers` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSpec {
    /// Display label.
    pub name: ProviderName,
    /// Endpoint URL.
    pub url: ProviderUrl,
    /// Wire mechanism.
    pub transport_type: TransportKind,
    /// Complete header pairs.
    pub headers: HeaderSet,
}

/// Provider record as stored in the blob store.
///
/// `transportType` is optional because records written before transport
/// selection existed do not carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProvider {
    /// Opaque identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Endpoint URL.
    pub url: String,
    /// Wire mechanism, absent in legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportKind>,
    /// Header pairs.
    #[serde(default)]
    pub headers: Vec<RequestHeader>,
}

/// Persisted record that could not be turned into a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Identifier of the rejected record.
    pub id: String,
    /// Why the record was rejected.
    pub reason: String,
}

/// Result of migrating persisted records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigratedRecords {
    /// Providers in stored order.
    pub providers: Vec<ToolProvider>,
    /// Records that were dropped.
    pub skipped: Vec<SkippedRecord>,
}

/// Turns persisted records into providers.
///
/// Missing transport kinds default to streaming. Records that fail validation
/// or repeat an earlier identifier are reported in
/// [`MigratedRecords::skipped`]. The stored bytes are not touched.
#[must_use]
pub fn migrate_records(records: Vec<PersistedProvider>) -> MigratedRecords {
    let mut seen = HashSet::new();
    let mut migrated = MigratedRecords::default();

    for record in records {
        if !seen.insert(record.id.clone()) {
            migrated.skipped.push(SkippedRecord {
                id: record.id,
                reason: "duplicate provider identifier".to_owned(),
            });
            continue;
        }

        let record_id = record.id.clone();
        let draft = ProviderDraft {
            name: record.name,
            url: record.url,
            transport_kind: record.transport_type.unwrap_or_default(),
            headers: record.headers,
        };
        match draft.validate() {
            Ok(settings) => migrated
                .providers
                .push(ToolProvider::new(ProviderId::from_raw(record.id), settings)),
            Err(err) => migrated.skipped.push(SkippedRecord {
                id: record_id,
                reason: err.to_string(),
            }),
        }
    }

    migrated
}
