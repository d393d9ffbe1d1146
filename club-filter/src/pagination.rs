//! Offset pagination extracted from the reserved `page` and `limit` keys.
//!
//! Pagination never blocks a request: a missing, malformed, zero or
//! negative value is replaced by its default instead of being reported.
//!
//! ```
//! use club_filter::{PageLimits, Pagination, RawQuery, extract_pagination};
//!
//! let raw: RawQuery = [("page", "3"), ("limit", "20")].into_iter().collect();
//! let page = extract_pagination(&raw, &PageLimits::default());
//! assert_eq!(page, Pagination::new(3, 20));
//! assert_eq!(page.skip(), 40);
//! assert_eq!(page.take(), 20);
//!
//! let page = extract_pagination(&RawQuery::new(), &PageLimits::default());
//! assert_eq!(page, Pagination::new(1, 10));
//! ```

use serde::Serialize;

use crate::RawQuery;
use crate::constants::{DEFAULT_LIMIT, DEFAULT_PAGE, LIMIT_KEY, PAGE_KEY};

/// Page selection handed to the persistence collaborator.
///
/// Both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Pagination {
    /// Create pagination, raising zero values to 1.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
            limit: if limit == 0 { 1 } else { limit },
        }
    }

    /// Rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.limit as u64
    }

    /// Rows to take: `limit`.
    #[must_use]
    pub const fn take(&self) -> u32 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Page size policy of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct PageLimits {
    /// Page size when the request does not pick a valid one.
    pub default_limit: u32,
    /// Upper bound for a requested page size. `None` = unbounded.
    pub max_limit: Option<u32>,
}

impl PageLimits {
    /// Limits with the given default and no maximum.
    #[must_use]
    pub const fn new(default_limit: u32) -> Self {
        Self {
            default_limit,
            max_limit: None,
        }
    }

    /// Set the maximum page size.
    #[must_use]
    pub const fn with_max(mut self, max_limit: u32) -> Self {
        self.max_limit = Some(max_limit);
        self
    }

    const fn clamp(&self, limit: u32) -> u32 {
        match self.max_limit {
            Some(max) if limit > max => max,
            _ => limit,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// Read `page` and `limit` from a raw query.
///
/// Always returns complete pagination; see the module docs for the
/// fallback rules. A limit above [`PageLimits::max_limit`] is clamped.
#[must_use]
pub fn extract_pagination(raw: &RawQuery, limits: &PageLimits) -> Pagination {
    let page = positive_or(raw, PAGE_KEY, DEFAULT_PAGE);
    let limit = limits.clamp(positive_or(raw, LIMIT_KEY, limits.default_limit));
    Pagination::new(page, limit)
}

fn positive_or(raw: &RawQuery, key: &str, default: u32) -> u32 {
    let Some(value) = raw.get(key) else {
        return default;
    };
    match parse_positive(value) {
        Some(n) => n,
        None => {
            tracing::debug!(key, value, default, "invalid pagination value, using default");
            default
        },
    }
}

/// Parse a strictly positive integer.
fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}
