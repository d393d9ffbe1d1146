//! Whitelist validation for query keys.
//!
//! This module provides:
//! - [`FieldSpec`]: the per-endpoint whitelist (equality-only and
//!   any-operator attributes, extra reserved keys, page size limits)
//! - [`route`]: classification of one raw key against a FieldSpec
//! - identifier checks used to keep attribute names safe for SQL backends
//!
//! # Example
//!
//! ```
//! use club_filter::{FieldSpec, Route, Operator, route};
//!
//! let spec = FieldSpec::builder()
//!     .equality_only(&["status"])
//!     .any_operator(&["title", "created_at"])
//!     .build()
//!     .unwrap();
//!
//! assert!(matches!(route(&spec, "page"), Ok(Route::Pagination)));
//! assert!(matches!(route(&spec, "title_like"), Ok(Route::Filter(t)) if t.op == Operator::Like));
//! assert!(route(&spec, "status_ne").is_err());
//! assert!(route(&spec, "password").is_err());
//! ```

mod field_spec;
mod ident;
mod operator;

pub use field_spec::{FieldSpec, FieldSpecBuilder};
pub use ident::{assert_valid_sql_identifier, is_valid_sql_identifier};
pub use operator::{Route, route};
