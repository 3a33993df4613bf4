//! Runtime configuration for the provider registry, cache and transports.
//!
//! Defaults suit an interactive single-user client. [`ToolportConfig::from_env`]
//! layers `TOOLPORT_*` environment overrides on top of them.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Blob-store slot used when no override is configured.
pub const DEFAULT_STORAGE_KEY: &str = "mcp-servers";

/// Discovery results older than this are treated as absent.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const STORAGE_KEY_VAR: &str = "TOOLPORT_STORAGE_KEY";
const CACHE_TTL_VAR: &str = "TOOLPORT_CACHE_TTL_SECS";
const CONNECT_TIMEOUT_VAR: &str = "TOOLPORT_CONNECT_TIMEOUT_SECS";
const REQUEST_TIMEOUT_VAR: &str = "TOOLPORT_REQUEST_TIMEOUT_SECS";

/// Errors returned while reading configuration overrides.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration variable is not a positive whole number of seconds.
    #[error("{variable} must be a positive number of seconds, got '{value}'")]
    InvalidDuration {
        /// Environment variable name.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The storage key override is blank.
    #[error("{0} must not be empty")]
    EmptyStorageKey(&'static str),
}

/// Registry persistence settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    storage_key: String,
}

impl RegistryConfig {
    /// Sets the blob-store slot name.
    #[must_use]
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Returns the blob-store slot name.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

/// Discovery cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    ttl: Duration,
}

impl CacheConfig {
    /// Sets the expiration window.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the expiration window.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Remote transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    client_name: String,
    client_version: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl TransportConfig {
    /// Sets the client name announced during the handshake.
    #[must_use]
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    /// Sets the client version announced during the handshake.
    #[must_use]
    pub fn with_client_version(mut self, client_version: impl Into<String>) -> Self {
        self.client_version = client_version.into();
        self
    }

    /// Sets how long opening a channel may take, handshake included.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets how long a single catalog request may take.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the announced client name.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Returns the announced client version.
    #[must_use]
    pub fn client_version(&self) -> &str {
        &self.client_version
    }

    /// Returns the channel open timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            client_name: env!("CARGO_PKG_NAME").to_owned(),
            client_version: env!("CARGO_PKG_VERSION").to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolportConfig {
    /// Registry persistence settings.
    pub registry: RegistryConfig,
    /// Discovery cache settings.
    pub cache: CacheConfig,
    /// Remote transport settings.
    pub transport: TransportConfig,
}

impl ToolportConfig {
    /// Builds a configuration from defaults and `TOOLPORT_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from defaults and a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(STORAGE_KEY_VAR) {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::EmptyStorageKey(STORAGE_KEY_VAR));
            }
            config.registry = config.registry.with_storage_key(trimmed);
        }
        if let Some(ttl) = parse_seconds(CACHE_TTL_VAR, lookup(CACHE_TTL_VAR))? {
            config.cache = config.cache.with_ttl(ttl);
        }
        if let Some(timeout) = parse_seconds(CONNECT_TIMEOUT_VAR, lookup(CONNECT_TIMEOUT_VAR))? {
            config.transport = config.transport.with_connect_timeout(timeout);
        }
        if let Some(timeout) = parse_seconds(REQUEST_TIMEOUT_VAR, lookup(REQUEST_TIMEOUT_VAR))? {
            config.transport = config.transport.with_request_timeout(timeout);
        }

        Ok(config)
    }
}

fn parse_seconds(
    variable: &'static str,
    value: Option<String>,
) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Some(Duration::from_secs(seconds))),
        _ => Err(ConfigError::InvalidDuration {
            variable,
            value: raw,
        }),
    }
}
