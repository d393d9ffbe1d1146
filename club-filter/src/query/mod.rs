//! The compiler's input: decoded query keys and values.

mod decode;

pub use decode::url_decode;

use std::collections::{BTreeMap, HashMap};

use crate::error::DecodeError;

/// Decoded query parameters of one request.
///
/// One value per key, iterated in key order, so everything derived from a
/// RawQuery is deterministic regardless of how the transport ordered it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    params: BTreeMap<String, String>,
}

impl RawQuery {
    /// Create an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Parse a raw, percent-encoded query string such as
    /// `title_like=spring+gala&page=2`.
    ///
    /// - a leading `?` is ignored
    /// - pairs split on the first `=`; a pair without `=` has an empty value
    /// - empty segments and empty keys are skipped
    /// - keys and values are decoded with [`url_decode`]
    /// - for a repeated key the last value wins
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when a key or value decodes to more than
    /// 64KB.
    ///
    /// # Example
    ///
    /// ```
    /// use club_filter::RawQuery;
    ///
    /// let raw = RawQuery::parse("?title_like=spring+gala&page=2").unwrap();
    /// assert_eq!(raw.get("title_like"), Some("spring gala"));
    /// assert_eq!(raw.get("page"), Some("2"));
    /// ```
    pub fn parse(query: &str) -> Result<Self, DecodeError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut raw = Self::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = url_decode(key)?;
            if key.is_empty() {
                continue;
            }
            raw.insert(key, url_decode(value)?);
        }

        Ok(raw)
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawQuery {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for RawQuery {
    fn from(params: BTreeMap<String, String>) -> Self {
        Self { params }
    }
}

impl<S: std::hash::BuildHasher> From<HashMap<String, String, S>> for RawQuery {
    fn from(params: HashMap<String, String, S>) -> Self {
        params.into_iter().collect()
    }
}
