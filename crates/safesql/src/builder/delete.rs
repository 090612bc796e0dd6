use super::condition::Conditions;
use crate::error::SqlResult;
use crate::safe_sql::SafeSql;

impl SafeSql {
    /// `DELETE FROM <table> [WHERE ...]`
    ///
    /// A typed list renders like [`update`](Self::update)'s WHERE clause; a
    /// raw string is appended verbatim after `WHERE `. Empty conditions of
    /// either form omit the WHERE clause.
    pub fn delete(&self, table: &str, conditions: &Conditions) -> SqlResult<String> {
        let mut sql = format!("DELETE FROM {}", self.format_name(table)?);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            match conditions {
                Conditions::Raw(raw) => sql.push_str(raw),
                Conditions::List(fields) => sql.push_str(&self.render_fields(fields, " AND ")?),
            }
        }
        tracing::trace!(target: "safesql", sql = %sql, "assembled delete");
        Ok(sql)
    }
}
