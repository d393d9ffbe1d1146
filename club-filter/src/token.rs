//! Query key tokenizer.
//!
//! A key is split once, at its last underscore. When the trailing segment
//! is an operator token the key names `(attribute, operator)`, otherwise
//! the whole key is the attribute and the operator is `eq`:
//!
//! | Key            | Attribute     | Operator |
//! |----------------|---------------|----------|
//! | `age_gte`      | `age`         | `gte`    |
//! | `title_like`   | `title`       | `like`   |
//! | `created_by`   | `created_by`  | `eq`     |
//! | `status`       | `status`      | `eq`     |

use crate::Operator;
use crate::constants::OPERATOR_SEPARATOR;

/// A key split into attribute and operator. Borrows from the raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Token<'a> {
    /// Attribute part of the key.
    pub attribute: &'a str,
    /// Operator named by the suffix, or `Eq` when there is none.
    pub op: Operator,
}

/// Split a raw key into attribute and operator.
///
/// Only the segment after the rightmost `_` is inspected, and only an exact
/// (case-sensitive) operator token counts. A key with nothing before the
/// suffix (`_gt`) is kept whole as an attribute.
///
/// # Examples
///
/// ```
/// use club_filter::{Operator, tokenize};
///
/// let token = tokenize("age_gte");
/// assert_eq!((token.attribute, token.op), ("age", Operator::Gte));
///
/// let token = tokenize("created_by");
/// assert_eq!((token.attribute, token.op), ("created_by", Operator::Eq));
/// ```
#[must_use]
pub fn tokenize(key: &str) -> Token<'_> {
    if let Some((attribute, suffix)) = key.rsplit_once(OPERATOR_SEPARATOR)
        && !attribute.is_empty()
        && let Some(op) = Operator::from_suffix(suffix)
    {
        return Token { attribute, op };
    }

    Token {
        attribute: key,
        op: Operator::Eq,
    }
}

/// Whether an attribute name can be reached by some query key.
///
/// A name ending in `_<operator>` (say `price_lt`) is always split by
/// [`tokenize`], so no key ever targets it.
#[must_use]
pub fn is_addressable(attribute: &str) -> bool {
    tokenize(attribute).attribute == attribute
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(key: &str) -> (&str, Operator) {
        let t = tokenize(key);
        (t.attribute, t.op)
    }

    #[test]
    fn test_suffix_tokens() {
        assert_eq!(split("age_gt"), ("age", Operator::Gt));
        assert_eq!(split("age_gte"), ("age", Operator::Gte));
        assert_eq!(split("age_lt"), ("age", Operator::Lt));
        assert_eq!(split("age_lte"), ("age", Operator::Lte));
        assert_eq!(split("status_ne"), ("status", Operator::Ne));
        assert_eq!(split("title_like"), ("title", Operator::Like));
    }

    #[test]
    fn test_no_suffix_is_eq() {
        assert_eq!(split("status"), ("status", Operator::Eq));
        assert_eq!(split("created_by"), ("created_by", Operator::Eq));
        assert_eq!(split("event_date"), ("event_date", Operator::Eq));
    }

    #[test]
    fn test_only_last_segment_counts() {
        assert_eq!(split("gt_lt_like"), ("gt_lt", Operator::Like));
        assert_eq!(split("start_date_gte"), ("start_date", Operator::Gte));
        // the operator token is not the last segment
        assert_eq!(split("age_gt_x"), ("age_gt_x", Operator::Eq));
    }

    #[test]
    fn test_explicit_eq_suffix_is_not_an_operator() {
        assert_eq!(split("status_eq"), ("status_eq", Operator::Eq));
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(split("age_GT"), ("age_GT", Operator::Eq));
        assert_eq!(split("age_Like"), ("age_Like", Operator::Eq));
    }

    #[test]
    fn test_edge_keys() {
        assert_eq!(split(""), ("", Operator::Eq));
        assert_eq!(split("_"), ("_", Operator::Eq));
        assert_eq!(split("_gt"), ("_gt", Operator::Eq));
        assert_eq!(split("age_"), ("age_", Operator::Eq));
        assert_eq!(split("__gt"), ("_", Operator::Gt));
    }

    #[test]
    fn test_is_addressable() {
        assert!(is_addressable("title"));
        assert!(is_addressable("created_by"));
        assert!(!is_addressable("price_lt"));
        assert!(!is_addressable("name_like"));
    }
}
