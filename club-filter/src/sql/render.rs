//! Rendering of compiled queries to parameterized SQL.

use super::dialect::Dialect;
use crate::validate::assert_valid_sql_identifier;
use crate::{CompiledFilter, CompiledQuery, Condition, Operator, Value};

/// Query result with SQL string and parameters.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "QueryResult must be used to execute the query"]
#[non_exhaustive]
pub struct QueryResult {
    /// SQL text with numbered placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub params: Vec<Value>,
}

/// Render the conditions of a filter joined by `AND`.
///
/// Placeholders are numbered from `start_idx`. Returns the SQL (empty for
/// an empty filter), the parameters, and the next free placeholder index.
pub fn where_clause<D: Dialect>(
    dialect: &D,
    filter: &CompiledFilter,
    start_idx: usize,
) -> (String, Vec<Value>, usize) {
    let mut idx = start_idx;
    let mut params = Vec::with_capacity(filter.len());
    let mut conditions = Vec::with_capacity(filter.len());

    for (field, cond) in filter.iter() {
        conditions.push(condition(dialect, field, cond, idx));
        params.push(cond.value.clone());
        idx += 1;
    }

    (conditions.join(" AND "), params, idx)
}

/// Render a single condition. Every value is a bound parameter.
fn condition<D: Dialect>(dialect: &D, field: &str, cond: &Condition, idx: usize) -> String {
    let op = match cond.op {
        Operator::Like => return dialect.substring_match(field, idx),
        Operator::Eq => "=",
        Operator::Ne => "!=",
        Operator::Gt => ">",
        Operator::Gte => ">=",
        Operator::Lt => "<",
        Operator::Lte => "<=",
    };
    format!("{field} {op} {}", dialect.placeholder(idx))
}

/// Render `SELECT <fields> FROM <table> [WHERE ...] LIMIT <take> OFFSET <skip>`.
///
/// # Panics
///
/// Panics if the table or a field name is not a valid SQL identifier.
/// Attribute names need no check: a FieldSpec only holds identifiers.
pub fn select<D: Dialect>(
    dialect: D,
    table: &str,
    fields: &[&str],
    query: &CompiledQuery,
) -> QueryResult {
    assert_valid_sql_identifier(table, "table");
    for field in fields {
        assert_valid_sql_identifier(field, "column");
    }

    let columns = if fields.is_empty() {
        "*".to_string()
    } else {
        fields.join(", ")
    };

    let mut sql = format!("SELECT {columns} FROM {table}");
    let (conditions, params, _) = where_clause(&dialect, &query.filter, 1);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions);
    }
    sql.push_str(&format!(
        " LIMIT {} OFFSET {}",
        query.pagination.take(),
        query.pagination.skip()
    ));

    tracing::trace!(dialect = D::NAME, table, params = params.len(), "rendered select");
    QueryResult { sql, params }
}

/// Render `SELECT COUNT(*) FROM <table> [WHERE ...]` for the total of a
/// paginated listing.
///
/// # Panics
///
/// Panics if the table name is not a valid SQL identifier.
pub fn count<D: Dialect>(dialect: D, table: &str, filter: &CompiledFilter) -> QueryResult {
    assert_valid_sql_identifier(table, "table");

    let mut sql = format!("SELECT COUNT(*) FROM {table}");
    let (conditions, params, _) = where_clause(&dialect, filter, 1);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions);
    }

    QueryResult { sql, params }
}
