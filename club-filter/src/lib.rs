// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // FieldSpec, RawQuery etc. read as prose in docs
#![allow(clippy::module_name_repetitions)] // validate::FieldSpecBuilder and friends
#![allow(clippy::format_push_string)] // SQL text is assembled incrementally

//! # club-filter - Query-String Filter Compiler
//!
//! Turns the query parameters of a list/search endpoint into a validated,
//! typed filter plus pagination, against a per-endpoint whitelist.
//!
//! ## Quick Start
//!
//! ```
//! # use club_filter::prelude::*;
//! let events = FieldSpec::builder()
//!     .equality_only(&["status"])
//!     .any_operator(&["title", "capacity"])
//!     .build()
//!     .unwrap();
//!
//! let raw = RawQuery::parse("status=open&capacity_gte=20&title_like=gala&page=2").unwrap();
//! let query = compile(&raw, &events).unwrap();
//!
//! assert_eq!(query.filter.get("capacity")[0].value, Value::Int(20));
//! assert_eq!(query.pagination, Pagination::new(2, 10));
//! ```
//!
//! ## Query Keys
//!
//! A key is `attribute` or `attribute_<op>`:
//!
//! | Suffix  | Operator | Value                                  |
//! |---------|----------|----------------------------------------|
//! | (none)  | `Eq`     | `true`/`false`, number, or text        |
//! | `_ne`   | `Ne`     | number or text                         |
//! | `_gt`   | `Gt`     | number (required)                      |
//! | `_gte`  | `Gte`    | number (required)                      |
//! | `_lt`   | `Lt`     | number (required)                      |
//! | `_lte`  | `Lte`    | number (required)                      |
//! | `_like` | `Like`   | verbatim text, case-insensitive match  |
//!
//! Equality-only attributes accept no suffix at all. `page` and `limit`
//! select the page and never become filters.
//!
//! ## Errors
//!
//! A request either compiles completely or is rejected with one
//! [`QueryError`] listing every offending key:
//!
//! ```
//! # use club_filter::prelude::*;
//! let spec = FieldSpec::builder()
//!     .equality_only(&["status"])
//!     .any_operator(&["age"])
//!     .build()
//!     .unwrap();
//!
//! let raw = RawQuery::parse("status_ne=pending&password=x").unwrap();
//! let err = compile(&raw, &spec).unwrap_err();
//! assert_eq!(err.to_string(), "invalid query parameters: password, status_ne");
//! ```

mod coerce;
mod compile;
pub mod constants;
mod error;
mod pagination;
mod query;
mod registry;
pub mod sql;
mod token;
mod types;
mod validate;

pub use coerce::coerce;
pub use compile::compile;
pub use error::{DecodeError, FieldSpecError, KeyError, QueryError, Reason, RegistryError};
pub use pagination::{PageLimits, Pagination, extract_pagination};
pub use query::{RawQuery, url_decode};
pub use registry::{Registry, Resource};
pub use token::{Token, is_addressable, tokenize};
pub use types::{CompiledFilter, CompiledQuery, Condition, Operator, Predicate, Value};
pub use validate::{
    FieldSpec, FieldSpecBuilder, Route, assert_valid_sql_identifier, is_valid_sql_identifier,
    route,
};

/// Prelude module for convenient imports.
///
/// ```
/// use club_filter::prelude::*;
/// let spec = FieldSpec::builder().any_operator(&["title"]).build().unwrap();
/// assert!(compile(&RawQuery::new(), &spec).is_ok());
/// ```
pub mod prelude {
    pub use crate::{
        CompiledFilter, CompiledQuery, Condition, FieldSpec, KeyError, Operator, PageLimits,
        Pagination, Predicate, QueryError, RawQuery, Reason, Registry, Resource, Value, compile,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts() -> FieldSpec {
        FieldSpec::builder()
            .equality_only(&["status", "author_id"])
            .any_operator(&["title", "views", "created_at"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_query_string_to_filter() {
        let raw = RawQuery::parse("status=published&views_gt=100&title_like=Spring+Gala").unwrap();
        let q = compile(&raw, &posts()).unwrap();

        assert_eq!(q.filter.get("status")[0].value, Value::text("published"));
        assert_eq!(q.filter.get("views")[0].op, Operator::Gt);
        assert_eq!(q.filter.get("views")[0].value, Value::Int(100));
        assert_eq!(q.filter.get("title")[0].value, Value::text("Spring Gala"));
        assert_eq!(q.pagination, Pagination::default());
    }

    #[test]
    fn test_encoded_key_is_tokenized_after_decoding() {
        let raw = RawQuery::parse("views%5Fgte=5").unwrap();
        let q = compile(&raw, &posts()).unwrap();
        assert_eq!(q.filter.get("views")[0].op, Operator::Gte);
    }

    #[test]
    fn test_numeric_id_is_coerced_on_eq() {
        let raw = RawQuery::parse("author_id=42").unwrap();
        let q = compile(&raw, &posts()).unwrap();
        assert_eq!(q.filter.get("author_id")[0].value, Value::Int(42));
    }

    #[test]
    fn test_compile_then_render() {
        let raw = RawQuery::parse("created_at_gte=20250101&created_at_lt=20260101&page=3&limit=20")
            .unwrap();
        let q = compile(&raw, &posts()).unwrap();
        let result = sql::sqlite("posts", &["id"], &q);
        assert_eq!(
            result.sql,
            "SELECT id FROM posts WHERE created_at >= ?1 AND created_at < ?2 LIMIT 20 OFFSET 40"
        );
    }

    #[test]
    fn test_like_wildcards_are_passed_verbatim() {
        let raw = RawQuery::parse("title_like=100%25").unwrap();
        let q = compile(&raw, &posts()).unwrap();
        assert_eq!(q.filter.get("title")[0].value, Value::text("100%"));
    }
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
