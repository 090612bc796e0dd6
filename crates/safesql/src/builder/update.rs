use super::condition::Field;
use crate::error::{SqlError, SqlResult};
use crate::safe_sql::SafeSql;

impl SafeSql {
    /// `UPDATE <table> SET <col> = <value>, ... [WHERE <col> = <value> AND ...]`
    ///
    /// Conditions are always AND-joined; the WHERE clause is omitted when
    /// there are none. An empty field list is a validation error.
    pub fn update(&self, table: &str, fields: &[Field], conditions: &[Field]) -> SqlResult<String> {
        if fields.is_empty() {
            return Err(SqlError::validation("UPDATE requires at least one SET field"));
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            self.format_name(table)?,
            self.render_fields(fields, ", ")?
        );
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.render_fields(conditions, " AND ")?);
        }
        tracing::trace!(target: "safesql", sql = %sql, "assembled update");
        Ok(sql)
    }
}
