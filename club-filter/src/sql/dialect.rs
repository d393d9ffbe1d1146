//! Placeholder and substring-match syntax per database.

/// Database-specific pieces of a rendered filter.
pub trait Dialect: Copy {
    /// Name used in log events.
    const NAME: &'static str;

    /// Bound parameter number `n` (1-based).
    fn placeholder(&self, n: usize) -> String;

    /// `column` contains parameter `n`, ignoring case.
    fn substring_match(&self, column: &str, n: usize) -> String;
}

/// Postgres: `$n` placeholders, `ILIKE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Postgres;

impl Dialect for Postgres {
    const NAME: &'static str = "postgres";

    #[inline]
    fn placeholder(&self, n: usize) -> String {
        format!("${n}")
    }

    #[inline]
    fn substring_match(&self, column: &str, n: usize) -> String {
        format!("{column} ILIKE '%' || ${n} || '%'")
    }
}

/// `SQLite`: `?n` placeholders, `LIKE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Sqlite;

impl Dialect for Sqlite {
    const NAME: &'static str = "sqlite";

    #[inline]
    fn placeholder(&self, n: usize) -> String {
        format!("?{n}")
    }

    #[inline]
    fn substring_match(&self, column: &str, n: usize) -> String {
        // ASCII case folding only
        format!("{column} LIKE '%' || ?{n} || '%'")
    }
}
