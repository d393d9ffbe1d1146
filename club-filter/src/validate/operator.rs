//! Classification of a raw key against a FieldSpec.

use super::FieldSpec;
use crate::Operator;
use crate::constants::PAGINATION_KEYS;
use crate::error::KeyError;
use crate::token::{Token, tokenize};

/// Where an accepted key goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Route<'k> {
    /// `page` or `limit`: consumed by the pagination extractor.
    Pagination,
    /// An extra reserved key of the endpoint: passed through.
    Reserved,
    /// A whitelisted attribute/operator pair: becomes a predicate.
    Filter(Token<'k>),
}

/// Validate one raw key.
///
/// Reserved keys are matched on the whole raw key and never reach the
/// attribute checks. Every other key is tokenized, then:
/// - an equality-only attribute accepts only `Eq`
/// - an any-operator attribute accepts every operator
/// - anything else is an unknown attribute
///
/// No other attribute/operator combination can get past this function.
pub fn route<'k>(spec: &FieldSpec, key: &'k str) -> Result<Route<'k>, KeyError> {
    if PAGINATION_KEYS.contains(&key) {
        return Ok(Route::Pagination);
    }
    if spec.is_reserved(key) {
        return Ok(Route::Reserved);
    }

    let token = tokenize(key);
    if spec.is_equality_only(token.attribute) {
        if token.op == Operator::Eq {
            Ok(Route::Filter(token))
        } else {
            Err(KeyError::illegal_operator(key, token.attribute, token.op))
        }
    } else if spec.is_any_operator(token.attribute) {
        Ok(Route::Filter(token))
    } else {
        Err(KeyError::unknown_attribute(key, token.attribute))
    }
}
