//! Core types shared by the compiler stages.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::pagination::Pagination;

/// Comparison operators a query key can carry.
///
/// The set is closed: a key suffix that is not one of these tokens is part
/// of the attribute name, and the operator is [`Operator::Eq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Operator {
    /// Exact match (no suffix).
    Eq,
    /// Not equal: `_ne`
    Ne,
    /// Greater than: `_gt`
    Gt,
    /// Greater than or equal: `_gte`
    Gte,
    /// Less than: `_lt`
    Lt,
    /// Less than or equal: `_lte`
    Lte,
    /// Case-insensitive substring match: `_like`
    Like,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
    ];

    /// Operators that may appear as a key suffix.
    pub const SUFFIXED: [Self; 6] = [
        Self::Lte,
        Self::Gte,
        Self::Lt,
        Self::Gt,
        Self::Ne,
        Self::Like,
    ];

    /// The token naming this operator (`eq`, `ne`, `gt`, ...).
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
        }
    }

    /// Look up a suffix token. Only the six suffix tokens match; `eq` is
    /// never written as a suffix and returns `None`.
    #[must_use]
    pub fn from_suffix(token: &str) -> Option<Self> {
        Self::SUFFIXED.into_iter().find(|op| op.token() == token)
    }

    /// Whether the operator compares numerically and needs a number.
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A coerced filter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Value {
    /// `true` / `false`
    Bool(bool),
    /// Integer that fits in an `i64`.
    Int(i64),
    /// Finite decimal.
    Float(f64),
    /// Decoded text, or a verbatim `like` pattern.
    Text(String),
}

impl Value {
    /// Shorthand for a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric payload widened to `f64`, if this is a number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One operator/value constraint on an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Condition {
    /// The comparison.
    pub op: Operator,
    /// The coerced right-hand side.
    pub value: Value,
}

impl Condition {
    /// Create a condition.
    #[must_use]
    pub const fn new(op: Operator, value: Value) -> Self {
        Self { op, value }
    }
}

/// A single filter constraint: attribute, operator and coerced value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Predicate {
    /// Whitelisted attribute name.
    pub attribute: String,
    /// The comparison.
    pub op: Operator,
    /// The coerced right-hand side.
    pub value: Value,
}

impl Predicate {
    /// Create a predicate.
    pub fn new(attribute: impl Into<String>, op: Operator, value: Value) -> Self {
        Self {
            attribute: attribute.into(),
            op,
            value,
        }
    }
}

/// All predicates of one request, grouped by attribute.
///
/// Conditions on the same attribute are implicitly ANDed, so
/// `age_gte=18&age_lte=30` reads as `18 <= age <= 30`. Attributes are kept
/// in sorted order, which makes the output deterministic for a given input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompiledFilter {
    by_attribute: BTreeMap<String, Vec<Condition>>,
}

impl CompiledFilter {
    /// Create an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_attribute: BTreeMap::new(),
        }
    }

    /// Append a condition to an attribute, keeping any existing ones.
    pub fn push(&mut self, attribute: impl Into<String>, op: Operator, value: Value) {
        self.by_attribute
            .entry(attribute.into())
            .or_default()
            .push(Condition::new(op, value));
    }

    /// Conditions for one attribute (empty if it is not filtered).
    #[must_use]
    pub fn get(&self, attribute: &str) -> &[Condition] {
        self.by_attribute.get(attribute).map_or(&[], Vec::as_slice)
    }

    /// Whether the filter constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_attribute.is_empty()
    }

    /// Number of predicates across all attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_attribute.values().map(Vec::len).sum()
    }

    /// Filtered attribute names, sorted.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.by_attribute.keys().map(String::as_str)
    }

    /// Iterate `(attribute, condition)` pairs, attributes sorted and
    /// conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.by_attribute
            .iter()
            .flat_map(|(attr, conds)| conds.iter().map(move |c| (attr.as_str(), c)))
    }

    /// Flatten into owned predicates.
    #[must_use]
    pub fn predicates(&self) -> Vec<Predicate> {
        self.iter()
            .map(|(attr, c)| Predicate::new(attr, c.op, c.value.clone()))
            .collect()
    }
}

impl Extend<Predicate> for CompiledFilter {
    fn extend<T: IntoIterator<Item = Predicate>>(&mut self, iter: T) {
        for p in iter {
            self.push(p.attribute, p.op, p.value);
        }
    }
}

impl FromIterator<Predicate> for CompiledFilter {
    fn from_iter<T: IntoIterator<Item = Predicate>>(iter: T) -> Self {
        let mut filter = Self::new();
        filter.extend(iter);
        filter
    }
}

/// Output of a successful compilation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct CompiledQuery {
    /// Predicates for the persistence collaborator.
    pub filter: CompiledFilter,
    /// Page selection, always complete.
    pub pagination: Pagination,
    /// Values of extra reserved keys (e.g. `sort`), passed through untouched.
    pub reserved: BTreeMap<String, String>,
}

impl CompiledQuery {
    /// Value of an extra reserved key, if the request carried it.
    #[must_use]
    pub fn reserved(&self, key: &str) -> Option<&str> {
        self.reserved.get(key).map(String::as_str)
    }
}
