//! Per-endpoint whitelist of filterable attributes.

use std::collections::BTreeSet;

use super::ident::is_valid_sql_identifier;
use crate::constants::PAGINATION_KEYS;
use crate::error::FieldSpecError;
use crate::pagination::PageLimits;
use crate::token::is_addressable;

/// Filter configuration of one endpoint.
///
/// Built once at startup with [`FieldSpec::builder`] and read-only
/// afterwards; it is `Send + Sync` and meant to be shared by reference
/// across requests.
///
/// Two kinds of filterable attributes:
/// - **equality-only**: exact match only (`status=active`)
/// - **any-operator**: `eq`, `ne`, `gt`, `gte`, `lt`, `lte` and `like`
///
/// Anything else in a query is rejected, except the pagination keys and
/// the configured extra reserved keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    equality_only: BTreeSet<String>,
    any_operator: BTreeSet<String>,
    reserved: BTreeSet<String>,
    limits: PageLimits,
}

impl FieldSpec {
    /// Start building a FieldSpec.
    ///
    /// # Example
    ///
    /// ```
    /// use club_filter::FieldSpec;
    ///
    /// let events = FieldSpec::builder()
    ///     .equality_only(&["status", "organizer_id"])
    ///     .any_operator(&["title", "start_date", "capacity"])
    ///     .reserved(&["sort"])
    ///     .max_limit(100)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(events.is_equality_only("status"));
    /// assert!(events.is_any_operator("start_date"));
    /// assert!(events.is_reserved("sort"));
    /// ```
    #[must_use]
    pub fn builder() -> FieldSpecBuilder {
        FieldSpecBuilder::default()
    }

    /// Whether `attribute` accepts only exact matches.
    #[must_use]
    pub fn is_equality_only(&self, attribute: &str) -> bool {
        self.equality_only.contains(attribute)
    }

    /// Whether `attribute` accepts every operator.
    #[must_use]
    pub fn is_any_operator(&self, attribute: &str) -> bool {
        self.any_operator.contains(attribute)
    }

    /// Whether `key` is an extra reserved key passed through untouched.
    #[must_use]
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved.contains(key)
    }

    /// Equality-only attributes, sorted.
    pub fn equality_only_attributes(&self) -> impl Iterator<Item = &str> {
        self.equality_only.iter().map(String::as_str)
    }

    /// Any-operator attributes, sorted.
    pub fn any_operator_attributes(&self) -> impl Iterator<Item = &str> {
        self.any_operator.iter().map(String::as_str)
    }

    /// Page size policy.
    #[must_use]
    pub const fn page_limits(&self) -> &PageLimits {
        &self.limits
    }
}

/// Builder for [`FieldSpec`]. Checks the configuration in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct FieldSpecBuilder {
    equality_only: Vec<String>,
    any_operator: Vec<String>,
    reserved: Vec<String>,
    default_limit: Option<u32>,
    max_limit: Option<u32>,
}

impl FieldSpecBuilder {
    /// Add equality-only attributes.
    #[must_use]
    pub fn equality_only<S: AsRef<str>>(mut self, attributes: &[S]) -> Self {
        self.equality_only
            .extend(attributes.iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Add any-operator attributes.
    #[must_use]
    pub fn any_operator<S: AsRef<str>>(mut self, attributes: &[S]) -> Self {
        self.any_operator
            .extend(attributes.iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Add extra reserved keys, excluded from filtering and passed through.
    #[must_use]
    pub fn reserved<S: AsRef<str>>(mut self, keys: &[S]) -> Self {
        self.reserved
            .extend(keys.iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Page size when the request does not pick one. Default 10.
    #[must_use]
    pub const fn default_limit(mut self, limit: u32) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Largest page size a request may ask for. Default unbounded.
    #[must_use]
    pub const fn max_limit(mut self, limit: u32) -> Self {
        self.max_limit = Some(limit);
        self
    }

    /// Check the configuration and build the FieldSpec.
    ///
    /// Rejects:
    /// - an attribute in both sets
    /// - attribute names that are empty or not plain identifiers
    /// - attribute names ending in an operator suffix (`price_lt`), which no
    ///   query key can reach
    /// - reserved keys (including `page` and `limit`) that are also attributes
    /// - a zero page size, or a default above the maximum
    pub fn build(self) -> Result<FieldSpec, FieldSpecError> {
        let equality_only: BTreeSet<String> = self.equality_only.into_iter().collect();
        let any_operator: BTreeSet<String> = self.any_operator.into_iter().collect();
        let reserved: BTreeSet<String> = self.reserved.into_iter().collect();

        if let Some(both) = equality_only.intersection(&any_operator).next() {
            return Err(FieldSpecError::Overlap(both.clone()));
        }

        for attribute in equality_only.iter().chain(&any_operator) {
            if attribute.is_empty() {
                return Err(FieldSpecError::EmptyName);
            }
            if !is_valid_sql_identifier(attribute) {
                return Err(FieldSpecError::InvalidName(attribute.clone()));
            }
            if !is_addressable(attribute) {
                return Err(FieldSpecError::Unaddressable(attribute.clone()));
            }
        }

        let reserved_keys = reserved.iter().map(String::as_str).chain(PAGINATION_KEYS);
        for key in reserved_keys {
            if key.is_empty() {
                return Err(FieldSpecError::EmptyName);
            }
            if equality_only.contains(key) || any_operator.contains(key) {
                return Err(FieldSpecError::ReservedConflict(key.to_string()));
            }
        }

        let mut limits = PageLimits::default();
        if let Some(default) = self.default_limit {
            if default == 0 {
                return Err(FieldSpecError::ZeroLimit("default_limit"));
            }
            limits.default_limit = default;
        }
        if let Some(max) = self.max_limit {
            if max == 0 {
                return Err(FieldSpecError::ZeroLimit("max_limit"));
            }
            if limits.default_limit > max {
                return Err(FieldSpecError::DefaultAboveMax {
                    default: limits.default_limit,
                    max,
                });
            }
            limits.max_limit = Some(max);
        }

        Ok(FieldSpec {
            equality_only,
            any_operator,
            reserved,
            limits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_sets() {
        let spec = FieldSpec::builder()
            .equality_only(&["status", "role"])
            .any_operator(&["name", "created_at"])
            .build()
            .unwrap();

        assert!(spec.is_equality_only("status"));
        assert!(!spec.is_equality_only("name"));
        assert!(spec.is_any_operator("created_at"));
        assert!(!spec.is_any_operator("role"));
        assert_eq!(
            spec.equality_only_attributes().collect::<Vec<_>>(),
            vec!["role", "status"]
        );
        assert_eq!(*spec.page_limits(), PageLimits::default());
    }

    #[test]
    fn test_duplicates_collapse() {
        let spec = FieldSpec::builder()
            .any_operator(&["title", "title"])
            .build()
            .unwrap();
        assert_eq!(spec.any_operator_attributes().count(), 1);
    }

    #[test]
    fn test_rejects_overlap() {
        let err = FieldSpec::builder()
            .equality_only(&["status"])
            .any_operator(&["status"])
            .build()
            .unwrap_err();
        assert_eq!(err, FieldSpecError::Overlap("status".into()));
    }

    #[test]
    fn test_rejects_bad_names() {
        let err = FieldSpec::builder().any_operator(&[""]).build().unwrap_err();
        assert_eq!(err, FieldSpecError::EmptyName);

        let err = FieldSpec::builder()
            .any_operator(&["author.name"])
            .build()
            .unwrap_err();
        assert_eq!(err, FieldSpecError::InvalidName("author.name".into()));
    }

    #[test]
    fn test_rejects_unaddressable_attribute() {
        let err = FieldSpec::builder()
            .any_operator(&["price_lt"])
            .build()
            .unwrap_err();
        assert_eq!(err, FieldSpecError::Unaddressable("price_lt".into()));
    }

    #[test]
    fn test_rejects_reserved_conflicts() {
        let err = FieldSpec::builder()
            .any_operator(&["page"])
            .build()
            .unwrap_err();
        assert_eq!(err, FieldSpecError::ReservedConflict("page".into()));

        let err = FieldSpec::builder()
            .equality_only(&["sort"])
            .reserved(&["sort"])
            .build()
            .unwrap_err();
        assert_eq!(err, FieldSpecError::ReservedConflict("sort".into()));

        let err = FieldSpec::builder().reserved(&[""]).build().unwrap_err();
        assert_eq!(err, FieldSpecError::EmptyName);
    }

    #[test]
    fn test_limits() {
        let spec = FieldSpec::builder()
            .default_limit(20)
            .max_limit(50)
            .build()
            .unwrap();
        assert_eq!(*spec.page_limits(), PageLimits::new(20).with_max(50));

        assert_eq!(
            FieldSpec::builder().default_limit(0).build().unwrap_err(),
            FieldSpecError::ZeroLimit("default_limit")
        );
        assert_eq!(
            FieldSpec::builder().max_limit(0).build().unwrap_err(),
            FieldSpecError::ZeroLimit("max_limit")
        );
        assert_eq!(
            FieldSpec::builder().max_limit(5).build().unwrap_err(),
            FieldSpecError::DefaultAboveMax { default: 10, max: 5 }
        );
    }

    #[test]
    fn test_empty_spec_is_valid() {
        let spec = FieldSpec::builder().build().unwrap();
        assert_eq!(spec.equality_only_attributes().count(), 0);
        assert_eq!(spec.any_operator_attributes().count(), 0);
    }
}
