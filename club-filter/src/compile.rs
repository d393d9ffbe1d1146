//! The compile pipeline.
//!
//! ```text
//! RawQuery ─▶ tokenize + validate every key ──(any error)──▶ QueryError
//!                      │
//!                      ▼
//!              coerce every value ──────────(any error)──▶ QueryError
//!                      │
//!                      ▼
//!            build CompiledFilter + extract Pagination ──▶ CompiledQuery
//! ```
//!
//! Each stage scans all keys before deciding, so one rejection names every
//! offending key of that stage. Nothing partial is ever returned.

use std::collections::BTreeMap;

use crate::coerce::coerce;
use crate::error::{KeyError, QueryError};
use crate::pagination::extract_pagination;
use crate::token::Token;
use crate::validate::{FieldSpec, Route, route};
use crate::{CompiledFilter, CompiledQuery, Predicate, RawQuery};

/// A key that passed validation, waiting for coercion.
struct Accepted<'q> {
    key: &'q str,
    token: Token<'q>,
    value: &'q str,
}

/// Compile a request's query parameters against an endpoint's FieldSpec.
///
/// # Errors
///
/// Returns a [`QueryError`] naming every rejected key: unknown attributes
/// and illegal operators first (the coercion stage does not run), then
/// range operators with non-numeric values.
///
/// # Example
///
/// ```
/// use club_filter::{FieldSpec, Operator, RawQuery, Value, compile};
///
/// let spec = FieldSpec::builder().any_operator(&["age"]).build().unwrap();
/// let raw: RawQuery = [("age_gte", "18"), ("age_lte", "30"), ("page", "2")]
///     .into_iter()
///     .collect();
///
/// let query = compile(&raw, &spec).unwrap();
/// let age = query.filter.get("age");
/// assert_eq!(age.len(), 2);
/// assert_eq!((age[0].op, &age[0].value), (Operator::Gte, &Value::Int(18)));
/// assert_eq!((query.pagination.page, query.pagination.limit), (2, 10));
/// ```
pub fn compile(raw: &RawQuery, spec: &FieldSpec) -> Result<CompiledQuery, QueryError> {
    let mut accepted = Vec::with_capacity(raw.len());
    let mut reserved = BTreeMap::new();
    let mut errors = Vec::new();

    for (key, value) in raw.iter() {
        match route(spec, key) {
            Ok(Route::Pagination) => {},
            Ok(Route::Reserved) => {
                reserved.insert(key.to_string(), value.to_string());
            },
            Ok(Route::Filter(token)) => accepted.push(Accepted { key, token, value }),
            Err(e) => errors.push(e),
        }
    }
    reject_if_any(errors)?;

    let mut predicates = Vec::with_capacity(accepted.len());
    let mut errors = Vec::new();
    for Accepted { key, token, value } in accepted {
        match coerce(token.op, value) {
            Ok(v) => predicates.push(Predicate::new(token.attribute, token.op, v)),
            Err(reason) => errors.push(KeyError::new(key, reason)),
        }
    }
    reject_if_any(errors)?;

    let filter: CompiledFilter = predicates.into_iter().collect();
    let pagination = extract_pagination(raw, spec.page_limits());

    tracing::debug!(
        predicates = filter.len(),
        page = pagination.page,
        limit = pagination.limit,
        "compiled query filter"
    );

    Ok(CompiledQuery {
        filter,
        pagination,
        reserved,
    })
}

fn reject_if_any(errors: Vec<KeyError>) -> Result<(), QueryError> {
    match QueryError::from_errors(errors) {
        None => Ok(()),
        Some(err) => {
            tracing::debug!(errors = err.errors.len(), %err, "rejected query filter");
            Err(err)
        },
    }
}

impl FieldSpec {
    /// Compile `raw` against this FieldSpec. Same as [`compile`].
    pub fn compile(&self, raw: &RawQuery) -> Result<CompiledQuery, QueryError> {
        compile(raw, self)
    }
}
