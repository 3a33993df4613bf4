//! Conversion of provider headers into `reqwest` header maps.

use crate::tool_registry::{domain::HeaderSet, ports::DiscoveryError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Builds a header map, preserving order and repeated keys.
///
/// Names are trimmed because `HeaderName` rejects surrounding whitespace;
/// values are sent exactly as stored. A header that is not valid on the wire
/// fails the connection attempt rather than being silently dropped.
pub(super) fn header_map(headers: &HeaderSet) -> Result<HeaderMap, DiscoveryError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for header in headers {
        let name = HeaderName::from_bytes(header.key().trim().as_bytes()).map_err(|err| {
            DiscoveryError::Connection(format!("invalid header name '{}': {err}", header.key()))
        })?;
        let value = HeaderValue::from_str(header.value()).map_err(|err| {
            DiscoveryError::Connection(format!(
                "invalid value for header '{}': {err}",
                header.key()
            ))
        })?;
        map.append(name, value);
    }
    Ok(map)
}
