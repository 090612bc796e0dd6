use super::condition::Field;
use crate::error::{SqlError, SqlResult};
use crate::safe_sql::SafeSql;

impl SafeSql {
    /// `INSERT INTO <table> SET <col> = <value>, ...`
    ///
    /// Every value is formatted with its declared type. An empty field list
    /// is a validation error.
    pub fn insert(&self, table: &str, fields: &[Field]) -> SqlResult<String> {
        if fields.is_empty() {
            return Err(SqlError::validation("INSERT requires at least one field"));
        }

        let sql = format!(
            "INSERT INTO {} SET {}",
            self.format_name(table)?,
            self.render_fields(fields, ", ")?
        );
        tracing::trace!(target: "safesql", sql = %sql, "assembled insert");
        Ok(sql)
    }
}
