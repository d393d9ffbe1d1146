//! Error types.
//!
//! [`QueryError`] is the per-request rejection: it aggregates one
//! [`KeyError`] per offending raw key so a single client error can name all
//! of them. The other types report configuration and decoding problems.

use serde::Serialize;
use thiserror::Error;

use crate::Operator;

/// Why a single query key was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Reason {
    /// The key's attribute is not filterable on this endpoint.
    #[error("unknown attribute `{attribute}`")]
    UnknownAttribute {
        /// The attribute parsed from the key.
        attribute: String,
    },

    /// A non-`eq` operator was used on an equality-only attribute.
    #[error("operator `{operator}` is not allowed on `{attribute}`, only exact match is")]
    IllegalOperatorForField {
        /// The attribute parsed from the key.
        attribute: String,
        /// The rejected operator.
        operator: Operator,
    },

    /// The operator needs a number and the value is not one.
    #[error("operator `{operator}` needs a number, got `{value}`")]
    ValueCoercionFailure {
        /// The operator that required a number.
        operator: Operator,
        /// The raw value.
        value: String,
    },
}

impl Reason {
    /// Short machine-readable name of the reason.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownAttribute { .. } => "unknown_attribute",
            Self::IllegalOperatorForField { .. } => "illegal_operator_for_field",
            Self::ValueCoercionFailure { .. } => "value_coercion_failure",
        }
    }
}

/// A rejected raw key and the reason for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("`{key}`: {reason}")]
#[non_exhaustive]
pub struct KeyError {
    /// The raw query key as received.
    pub key: String,
    /// Why it was rejected.
    pub reason: Reason,
}

impl KeyError {
    /// `key` rejected for `reason`.
    #[must_use]
    pub fn new(key: &str, reason: Reason) -> Self {
        Self {
            key: key.to_string(),
            reason,
        }
    }

    /// Unknown attribute on `key`.
    #[must_use]
    pub fn unknown_attribute(key: &str, attribute: &str) -> Self {
        Self::new(
            key,
            Reason::UnknownAttribute {
                attribute: attribute.to_string(),
            },
        )
    }

    /// Illegal operator on an equality-only attribute.
    #[must_use]
    pub fn illegal_operator(key: &str, attribute: &str, operator: Operator) -> Self {
        Self::new(
            key,
            Reason::IllegalOperatorForField {
                attribute: attribute.to_string(),
                operator,
            },
        )
    }
}

/// A rejected request: every offending key, in key order.
///
/// The `Display` form is the single client-facing message and lists the
/// raw keys comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("invalid query parameters: {}", join_keys(.errors))]
#[non_exhaustive]
pub struct QueryError {
    /// One entry per rejected key. Never empty.
    pub errors: Vec<KeyError>,
}

impl QueryError {
    /// Wrap collected key errors. Returns `None` when there are none, so a
    /// stage can turn its collection straight into a pass/fail decision.
    #[must_use]
    pub fn from_errors(errors: Vec<KeyError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The rejected raw keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.key.as_str())
    }

    /// The error for one raw key, if that key was rejected.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Reason> {
        self.errors.iter().find(|e| e.key == key).map(|e| &e.reason)
    }

    /// Per-key detail lines, for logs or a verbose error body.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

fn join_keys(errors: &[KeyError]) -> String {
    errors
        .iter()
        .map(|e| e.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Invalid endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FieldSpecError {
    /// An attribute is listed as both equality-only and any-operator.
    #[error("attribute `{0}` is both equality-only and any-operator")]
    Overlap(String),

    /// An attribute name is empty.
    #[error("attribute names must not be empty")]
    EmptyName,

    /// An attribute name is not a plain identifier.
    #[error("attribute `{0}` must be an ASCII identifier of at most 63 chars")]
    InvalidName(String),

    /// An attribute ends in an operator suffix, so no key can address it.
    #[error("attribute `{0}` ends in an operator suffix and cannot be queried")]
    Unaddressable(String),

    /// An extra reserved key collides with a filterable attribute.
    #[error("reserved key `{0}` is also a filterable attribute")]
    ReservedConflict(String),

    /// A page size limit is zero.
    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),

    /// The default page size is larger than the maximum.
    #[error("default limit {default} exceeds max limit {max}")]
    DefaultAboveMax {
        /// The configured default page size.
        default: u32,
        /// The configured maximum page size.
        max: u32,
    },
}

/// Failure decoding a raw query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Decoded output would exceed the maximum length.
    #[error("url decoded output exceeds maximum length ({}KB limit)", crate::constants::MAX_URL_DECODED_LEN / 1024)]
    TooLong,
}

/// Failure building or using the endpoint registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// No FieldSpec is registered for the resource.
    #[error("no filter configuration for resource `{0}`")]
    UnknownResource(String),

    /// A resource's configuration is invalid.
    #[error("invalid filter configuration for `{resource}`: {source}")]
    Spec {
        /// The resource whose configuration failed.
        resource: String,
        /// The underlying configuration error.
        #[source]
        source: FieldSpecError,
    },

    /// The configuration file could not be read.
    #[error("failed to read filter configuration `{path}`: {source}")]
    Io {
        /// The file that was read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the registry schema.
    #[error("failed to parse filter configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_lists_all_keys() {
        let err = QueryError::from_errors(vec![
            KeyError::unknown_attribute("unknown_field", "unknown_field"),
            KeyError::illegal_operator("status_ne", "status", Operator::Ne),
            KeyError::new(
                "age_gt",
                Reason::ValueCoercionFailure {
                    operator: Operator::Gt,
                    value: "abc".into(),
                },
            ),
        ])
        .unwrap();

        assert_eq!(
            err.to_string(),
            "invalid query parameters: unknown_field, status_ne, age_gt"
        );
        assert_eq!(err.keys().count(), 3);
    }

    #[test]
    fn test_from_errors_empty_is_none() {
        assert!(QueryError::from_errors(vec![]).is_none());
    }

    #[test]
    fn test_get_reason_by_key() {
        let reason = crate::coerce(Operator::Gt, "x").unwrap_err();
        let err = QueryError::from_errors(vec![KeyError::new("age_gt", reason)]).unwrap();

        let Some(Reason::ValueCoercionFailure { operator, value }) = err.get("age_gt") else {
            panic!("expected ValueCoercionFailure for age_gt")
        };
        assert_eq!(*operator, Operator::Gt);
        assert_eq!(value, "x");
        assert!(err.get("other").is_none());
    }

    #[test]
    fn test_reason_display() {
        let r = KeyError::illegal_operator("status_like", "status", Operator::Like);
        assert_eq!(
            r.to_string(),
            "`status_like`: operator `like` is not allowed on `status`, only exact match is"
        );
        assert_eq!(r.reason.kind(), "illegal_operator_for_field");
    }

    #[test]
    fn test_reason_serializes_tagged() {
        let r = KeyError::unknown_attribute("x", "x");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"key":"x","reason":{"kind":"unknown_attribute","attribute":"x"}}"#
        );
    }

    #[test]
    fn test_field_spec_error_display() {
        assert_eq!(
            FieldSpecError::Overlap("status".into()).to_string(),
            "attribute `status` is both equality-only and any-operator"
        );
        assert_eq!(
            FieldSpecError::DefaultAboveMax {
                default: 50,
                max: 20
            }
            .to_string(),
            "default limit 50 exceeds max limit 20"
        );
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(
            DecodeError::TooLong.to_string(),
            "url decoded output exceeds maximum length (64KB limit)"
        );
    }
}
