//! Centralized constants for the club-filter crate.
//!
//! Reserved keys, operator tokens and pagination defaults live here so the
//! tokenizer, the validator and the pagination extractor agree on them.

// ============================================================================
// RESERVED KEYS
// ============================================================================

/// Query key selecting the 1-based page number.
pub const PAGE_KEY: &str = "page";

/// Query key selecting the page size.
pub const LIMIT_KEY: &str = "limit";

/// Keys consumed by pagination on every endpoint.
pub const PAGINATION_KEYS: [&str; 2] = [PAGE_KEY, LIMIT_KEY];

// ============================================================================
// PAGINATION DEFAULTS
// ============================================================================

/// Page used when `page` is absent or not a positive integer.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when `limit` is absent or not a positive integer.
pub const DEFAULT_LIMIT: u32 = 10;

// ============================================================================
// TOKENIZER
// ============================================================================

/// Separator between an attribute and its operator suffix.
pub const OPERATOR_SEPARATOR: char = '_';

// ============================================================================
// DECODING LIMITS
// ============================================================================

/// Maximum decoded length of a single query key or value (64KB).
///
/// Prevents memory exhaustion from crafted query strings.
pub const MAX_URL_DECODED_LEN: usize = 64 * 1024;
