//! Identifier and validated-value types for tool providers.

use super::ProviderDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length for provider names, header keys and header values.
pub(crate) const MAX_FIELD_LENGTH: usize = 2000;

/// Opaque identifier of a registered provider.
///
/// Fresh identifiers are UUIDs, but identifiers loaded from storage are kept
/// verbatim: older records used millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a new random provider identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier, such as one read from storage.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProviderId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Validated display label of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderName(String);

impl ProviderName {
    /// Creates a validated provider name.
    ///
    /// Surrounding whitespace is trimmed; case and inner spacing are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError`] when the name is blank or longer than
    /// 2000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProviderDomainError> {
        let normalized = value.into().trim().to_owned();

        if normalized.is_empty() {
            return Err(ProviderDomainError::EmptyProviderName);
        }

        if normalized.chars().count() > MAX_FIELD_LENGTH {
            return Err(ProviderDomainError::ProviderNameTooLong {
                limit: MAX_FIELD_LENGTH,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the provider name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProviderName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Validated absolute endpoint URL of a provider.
///
/// The URL doubles as the discovery cache key, so two providers with equal
/// URLs share cached results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderUrl(String);

impl ProviderUrl {
    /// Creates a validated provider URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError`] when the URL is blank or does not start
    /// with `http://` or `https://`.
    pub fn new(value: impl Into<String>) -> Result<Self, ProviderDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ProviderDomainError::EmptyProviderUrl);
        }

        let lowered = normalized.to_ascii_lowercase();
        let remainder = lowered
            .strip_prefix("https://")
            .or_else(|| lowered.strip_prefix("http://"));
        match remainder {
            Some(authority) if !authority.is_empty() && !authority.starts_with('/') => {
                Ok(Self(normalized))
            }
            _ => Err(ProviderDomainError::InvalidProviderUrl(normalized)),
        }
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProviderUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProviderUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
