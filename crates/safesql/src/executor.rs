//! The seam between SQL text and whatever runs it.

use crate::error::SqlResult;
use crate::value::Value;
use indexmap::IndexMap;

/// One result row: column name to value, in column order.
pub type Row = IndexMap<String, Value>;

/// Runs finished SQL text against a database.
///
/// Implement this for a driver connection, a pool handle or a test double.
/// The fetch helpers on [`SafeSql`](crate::SafeSql) substitute the template
/// first and hand the result here; an implementation never sees placeholders.
pub trait QueryExecutor: Send + Sync {
    /// Run a statement that returns rows.
    fn query(&self, sql: &str) -> impl std::future::Future<Output = SqlResult<Vec<Row>>> + Send;

    /// Run a statement and return the number of affected rows.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = SqlResult<u64>> + Send;
}
