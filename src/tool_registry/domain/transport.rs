//! Provider transport selection value objects.

use super::{HeaderSet, ParseTransportKindError, ProviderUrl};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire mechanism used to reach a provider.
///
/// Persisted as `"sse"` or `"http"`. Records that predate the field are read as
/// [`TransportKind::Streaming`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    /// Persistent server-sent event stream with connection-scoped headers.
    #[default]
    #[serde(rename = "sse")]
    Streaming,
    /// Single-endpoint request/response channel with per-call headers.
    #[serde(rename = "http")]
    RequestResponse,
}

impl TransportKind {
    /// Returns the canonical storage and display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Streaming => "sse",
            Self::RequestResponse => "http",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransportKind {
    type Error = ParseTransportKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sse" => Ok(Self::Streaming),
            "http" => Ok(Self::RequestResponse),
            _ => Err(ParseTransportKindError(value.to_owned())),
        }
    }
}

/// Transport variant carrying the headers in the form each wire expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderTransport {
    /// Event stream; headers are sent once as connection metadata.
    Streaming(HeaderSet),
    /// Request/response endpoint; headers are attached to every call.
    RequestResponse(HeaderSet),
}

impl ProviderTransport {
    /// Pairs a transport kind with its header set.
    #[must_use]
    pub fn new(kind: TransportKind, headers: HeaderSet) -> Self {
        match kind {
            TransportKind::Streaming => Self::Streaming(headers),
            TransportKind::RequestResponse => Self::RequestResponse(headers),
        }
    }

    /// Returns the transport kind.
    #[must_use]
    pub const fn kind(&self) -> TransportKind {
        match self {
            Self::Streaming(_) => TransportKind::Streaming,
            Self::RequestResponse(_) => TransportKind::RequestResponse,
        }
    }

    /// Returns the headers regardless of how they are attached.
    #[must_use]
    pub const fn headers(&self) -> &HeaderSet {
        match self {
            Self::Streaming(headers) | Self::RequestResponse(headers) => headers,
        }
    }
}

/// Everything a channel opener needs to reach one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTarget {
    url: ProviderUrl,
    transport: ProviderTransport,
}

impl ChannelTarget {
    /// Creates a channel target.
    #[must_use]
    pub const fn new(url: ProviderUrl, transport: ProviderTransport) -> Self {
        Self { url, transport }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn url(&self) -> &ProviderUrl {
        &self.url
    }

    /// Returns the transport variant.
    #[must_use]
    pub const fn transport(&self) -> &ProviderTransport {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransportKind::Streaming, "\"sse\"")]
    #[case(TransportKind::RequestResponse, "\"http\"")]
    fn serializes_with_wire_labels(#[case] kind: TransportKind, #[case] expected: &str) {
        let json = serde_json::to_string(&kind).expect("serializable");
        assert_eq!(json, expected);
        assert_eq!(format!("\"{kind}\""), expected);
    }

    #[rstest]
    #[case("sse", TransportKind::Streaming)]
    #[case(" HTTP ", TransportKind::RequestResponse)]
    fn parses_labels(#[case] input: &str, #[case] expected: TransportKind) {
        assert_eq!(TransportKind::try_from(input), Ok(expected));
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            TransportKind::try_from("stdio"),
            Err(ParseTransportKindError("stdio".to_owned()))
        );
    }

    #[test]
    fn default_kind_is_streaming() {
        assert_eq!(TransportKind::default(), TransportKind::Streaming);
    }

    #[test]
    fn transport_variant_round_trips_kind() {
        let transport = ProviderTransport::new(TransportKind::RequestResponse, HeaderSet::empty());
        assert_eq!(transport.kind(), TransportKind::RequestResponse);
        assert!(transport.headers().is_empty());
    }
}
