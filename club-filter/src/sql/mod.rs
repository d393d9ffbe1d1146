//! Parameterized SQL for relational persistence collaborators.
//!
//! The compiler itself is storage-agnostic; this module is one mapping of a
//! [`CompiledQuery`](crate::CompiledQuery) onto native syntax. Attribute
//! names come from the whitelist, values are always bound parameters, and
//! pagination becomes `LIMIT take OFFSET skip`.
//!
//! | Operator | Postgres                    | `SQLite`                   |
//! |----------|-----------------------------|----------------------------|
//! | `eq`     | `a = $1`                    | `a = ?1`                   |
//! | `ne`     | `a != $1`                   | `a != ?1`                  |
//! | `gt`     | `a > $1`                    | `a > ?1`                   |
//! | `gte`    | `a >= $1`                   | `a >= ?1`                  |
//! | `lt`     | `a < $1`                    | `a < ?1`                   |
//! | `lte`    | `a <= $1`                   | `a <= ?1`                  |
//! | `like`   | `a ILIKE '%' \|\| $1 \|\| '%'` | `a LIKE '%' \|\| ?1 \|\| '%'` |
//!
//! ```
//! use club_filter::{FieldSpec, RawQuery, compile, sql};
//!
//! let spec = FieldSpec::builder()
//!     .equality_only(&["status"])
//!     .any_operator(&["title"])
//!     .build()
//!     .unwrap();
//! let raw = RawQuery::parse("status=published&title_like=gala&page=2").unwrap();
//! let query = compile(&raw, &spec).unwrap();
//!
//! let result = sql::postgres("posts", &["id", "title"], &query);
//! assert_eq!(
//!     result.sql,
//!     "SELECT id, title FROM posts WHERE status = $1 AND title ILIKE '%' || $2 || '%' LIMIT 10 OFFSET 10"
//! );
//! assert_eq!(result.params.len(), 2);
//! ```

mod dialect;
mod render;

pub use dialect::{Dialect, Postgres, Sqlite};
pub use render::{QueryResult, count, select, where_clause};

use crate::{CompiledFilter, CompiledQuery};

/// Render a paginated SELECT for Postgres.
///
/// Convenience function for [`select`] with the Postgres dialect.
pub fn postgres(table: &str, fields: &[&str], query: &CompiledQuery) -> QueryResult {
    select(Postgres, table, fields, query)
}

/// Render a paginated SELECT for `SQLite`.
///
/// Convenience function for [`select`] with the `SQLite` dialect.
pub fn sqlite(table: &str, fields: &[&str], query: &CompiledQuery) -> QueryResult {
    select(Sqlite, table, fields, query)
}

/// Render a filtered `COUNT(*)` for Postgres.
pub fn postgres_count(table: &str, filter: &CompiledFilter) -> QueryResult {
    count(Postgres, table, filter)
}

/// Render a filtered `COUNT(*)` for `SQLite`.
pub fn sqlite_count(table: &str, filter: &CompiledFilter) -> QueryResult {
    count(Sqlite, table, filter)
}
