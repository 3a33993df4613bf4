//! Error types for provider domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing provider domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderDomainError {
    /// The provider name is empty after trimming.
    #[error("provider name must not be empty")]
    EmptyProviderName,

    /// The provider name exceeds the 2000-character limit.
    #[error("provider name exceeds {limit} character limit")]
    ProviderNameTooLong {
        /// Maximum accepted length.
        limit: usize,
    },

    /// The provider URL is empty after trimming.
    #[error("provider URL must not be empty")]
    EmptyProviderUrl,

    /// The provider URL is not an absolute `http://` or `https://` URL.
    #[error("provider URL '{0}' must start with 'http://' or 'https://'")]
    InvalidProviderUrl(String),

    /// A header key or value exceeds the 2000-character limit.
    #[error("request header '{key}' exceeds {limit} character limit")]
    HeaderTooLong {
        /// Header key, truncated for display when it is the oversized part.
        key: String,
        /// Maximum accepted length.
        limit: usize,
    },
}

/// Error returned while parsing a transport kind label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transport type: {0} (expected 'sse' or 'http')")]
pub struct ParseTransportKindError(pub String);
