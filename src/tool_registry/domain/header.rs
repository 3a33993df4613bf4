//! Outbound request header value objects.

use super::{ProviderDomainError, ids::MAX_FIELD_LENGTH};
use serde::{Deserialize, Serialize};

/// One caller-supplied header sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestHeader {
    key: String,
    value: String,
}

impl RequestHeader {
    /// Creates a header pair without validation.
    ///
    /// Pairs are filtered when collected into a [`HeaderSet`].
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the header name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the header value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn is_complete(&self) -> bool {
        !self.key.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// Ordered set of complete header pairs.
///
/// A pair with a blank key or a blank value never makes it into a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSet(Vec<RequestHeader>);

impl HeaderSet {
    /// Creates an empty header set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Builds a header set, dropping partially empty pairs.
    ///
    /// Retained pairs keep their original text and order.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError::HeaderTooLong`] when a retained key or
    /// value is longer than 2000 characters.
    pub fn new(
        headers: impl IntoIterator<Item = RequestHeader>,
    ) -> Result<Self, ProviderDomainError> {
        let retained = headers
            .into_iter()
            .filter(RequestHeader::is_complete)
            .collect::<Vec<_>>();

        if let Some(oversized) = retained.iter().find(|header| {
            header.key.chars().count() > MAX_FIELD_LENGTH
                || header.value.chars().count() > MAX_FIELD_LENGTH
        }) {
            return Err(ProviderDomainError::HeaderTooLong {
                key: oversized.key.chars().take(64).collect(),
                limit: MAX_FIELD_LENGTH,
            });
        }

        Ok(Self(retained))
    }

    /// Builds a header set from `(key, value)` tuples.
    ///
    /// # Errors
    ///
    /// See [`HeaderSet::new`].
    pub fn from_pairs<K, V>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ProviderDomainError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(key, value)| RequestHeader::new(key, value)),
        )
    }

    /// Returns the retained pairs in order.
    #[must_use]
    pub fn as_slice(&self) -> &[RequestHeader] {
        &self.0
    }

    /// Iterates over the retained pairs.
    pub fn iter(&self) -> std::slice::Iter<'_, RequestHeader> {
        self.0.iter()
    }

    /// Returns the number of retained pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a RequestHeader;
    type IntoIter = std::slice::Iter<'a, RequestHeader>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partially_empty_pairs_are_dropped() {
        let headers = HeaderSet::from_pairs([
            ("Authorization", "Bearer abc"),
            ("", "orphan"),
            ("X-Empty", "  "),
            ("X-Trace", "1"),
        ])
        .expect("valid headers");

        let keys = headers.iter().map(RequestHeader::key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["Authorization", "X-Trace"]);
    }

    #[test]
    fn retained_pairs_are_kept_verbatim() {
        let headers =
            HeaderSet::from_pairs([(" X-Key ", " value ")]).expect("valid headers");
        let first = headers.as_slice().first().expect("one header");
        assert_eq!(first.key(), " X-Key ");
        assert_eq!(first.value(), " value ");
    }

    #[test]
    fn oversized_value_is_rejected() {
        let result = HeaderSet::from_pairs([("X-Big", "v".repeat(MAX_FIELD_LENGTH + 1))]);
        assert!(matches!(
            result,
            Err(ProviderDomainError::HeaderTooLong { .. })
        ));
    }

    #[test]
    fn serializes_as_key_value_records() {
        let headers = HeaderSet::from_pairs([("X-Api-Key", "secret")]).expect("valid headers");
        let json = serde_json::to_value(&headers).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!([{ "key": "X-Api-Key", "value": "secret" }])
        );
    }
}
