//! Fetch helpers: substitute a template, run it, shape the result.
//!
//! Every helper substitutes first, so a template problem never reaches the
//! database. Executor failures are reported as `ConnectionError` with the
//! finished SQL and then returned unchanged.

use crate::error::{SqlError, SqlResult};
use crate::executor::{QueryExecutor, Row};
use crate::safe_sql::SafeSql;
use crate::value::Value;
use indexmap::IndexMap;

impl SafeSql {
    async fn fetch_rows<E: QueryExecutor>(
        &self,
        executor: &E,
        template: &str,
        args: &[Value],
    ) -> SqlResult<Vec<Row>> {
        let sql = self.substitute(template, args)?;
        tracing::debug!(target: "safesql", sql = %sql, "query");
        executor
            .query(&sql)
            .await
            .inspect_err(|err| self.report_executor(err, &sql))
    }

    /// Run a statement and return the number of affected rows.
    pub async fn query<E: QueryExecutor>(
        &self,
        executor: &E,
        template: &str,
        args: &[Value],
    ) -> SqlResult<u64> {
        let sql = self.substitute(template, args)?;
        tracing::debug!(target: "safesql", sql = %sql, "execute");
        executor
            .execute(&sql)
            .await
            .inspect_err(|err| self.report_executor(err, &sql))
    }

    /// All rows.
    pub async fn get_all<E: QueryExecutor>(
        &self,
        executor: &E,
        template: &str,
        args: &[Value],
    ) -> SqlResult<Vec<Row>> {
        self.fetch_rows(executor, template, args).await
    }

    /// The first row, or `None` when the result is empty.
    pub async fn get_row<E: QueryExecutor>(
        &self,
        executor: &E,
        template: &str,
        args: &[Value],
    ) -> SqlResult<Option<Row>> {
        let rows = self.fetch_rows(executor, template, args).await?;
        Ok(rows.into_iter().next())
    }

    /// First column of the first row, or `None` when the result is empty.
    pub async fn get_one<E: QueryExecutor>(
        &self,
        executor: &E,
        template: &str,
        args: &[Value],
    ) -> SqlResult<Option<Value>> {
        let row = self.get_row(executor, template, args).await?;
        Ok(row.and_then(first_column))
    }

    /// First column of every row.
    pub async fn get_col<E: QueryExecutor>(
        &self,
        executor: &E,
        template: &str,
        args: &[Value],
    ) -> SqlResult<Vec<Value>> {
        let rows = self.fetch_rows(executor, template, args).await?;
        Ok(rows
            .into_iter()
            .map(|row| first_column(row).unwrap_or_default())
            .collect())
    }

    /// Rows keyed by the text of their `index_column` value.
    ///
    /// Later rows overwrite earlier ones with the same key. A row without
    /// `index_column` is a `NotFound` error.
    pub async fn get_ind<E: QueryExecutor>(
        &self,
        executor: &E,
        index_column: &str,
        template: &str,
        args: &[Value],
    ) -> SqlResult<IndexMap<String, Row>> {
        let rows = self.fetch_rows(executor, template, args).await?;
        let mut out = IndexMap::with_capacity(rows.len());
        for row in rows {
            let key = index_key(&row, index_column)?;
            out.insert(key, row);
        }
        Ok(out)
    }

    /// The first column other than `index_column`, keyed by the text of the
    /// `index_column` value. Rows with no other column map to `Null`.
    pub async fn get_ind_col<E: QueryExecutor>(
        &self,
        executor: &E,
        index_column: &str,
        template: &str,
        args: &[Value],
    ) -> SqlResult<IndexMap<String, Value>> {
        let rows = self.fetch_rows(executor, template, args).await?;
        let mut out = IndexMap::with_capacity(rows.len());
        for row in rows {
            let key = index_key(&row, index_column)?;
            let value = row
                .into_iter()
                .find(|(name, _)| name != index_column)
                .map(|(_, value)| value)
                .unwrap_or_default();
            out.insert(key, value);
        }
        Ok(out)
    }
}

fn first_column(row: Row) -> Option<Value> {
    row.into_iter().next().map(|(_, value)| value)
}

fn index_key(row: &Row, index_column: &str) -> SqlResult<String> {
    row.get(index_column)
        .map(Value::to_text)
        .ok_or_else(|| SqlError::not_found(format!("index column `{index_column}` not in row")))
}
