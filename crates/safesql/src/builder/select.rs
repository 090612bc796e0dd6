use super::condition::{Condition, ConditionEntry};
use crate::error::SqlResult;
use crate::safe_sql::SafeSql;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Join flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    #[serde(alias = "LEFT")]
    Left,
    #[serde(alias = "RIGHT")]
    Right,
    #[serde(alias = "INNER")]
    Inner,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Inner => "INNER JOIN",
        }
    }
}

/// `<kind> JOIN <table> ON (<on>)`. `on` is raw SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub on: String,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl Direction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    #[serde(default)]
    pub direction: Direction,
}

/// Declarative SELECT description.
///
/// Clauses render in a fixed order (`SELECT`, `FROM`, joins, `WHERE`,
/// `GROUP BY`, `HAVING`, `ORDER BY`) and an empty clause is left out
/// entirely, keyword included.
///
/// ```ignore
/// let q = SelectQuery::new("users u")
///     .fields(["u.id", "u.name"])
///     .left_join("roles r", "u.role_id = r.id")
///     .and_where(Condition::new("u.age", DeclaredType::Integer, 21))
///     .order_desc("u.created_at");
/// let sql = SafeSql::new().select(&q)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectQuery {
    pub fields: Vec<String>,
    pub from: String,
    pub joins: Vec<Join>,
    #[serde(rename = "where")]
    pub conditions: Vec<ConditionEntry>,
    pub group_by: Vec<String>,
    pub having: Vec<ConditionEntry>,
    pub order_by: Vec<OrderBy>,
}

impl SelectQuery {
    /// Start a query over `from`.
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            ..Self::default()
        }
    }

    /// Append SELECT columns.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Append one SELECT column.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Add a join.
    pub fn join(mut self, kind: JoinKind, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.joins.push(Join {
            kind,
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.join(JoinKind::Left, table, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.join(JoinKind::Right, table, on)
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.join(JoinKind::Inner, table, on)
    }

    /// Add a WHERE entry as given (typed condition or pair).
    pub fn filter(mut self, entry: impl Into<ConditionEntry>) -> Self {
        self.conditions.push(entry.into());
        self
    }

    /// Add an AND WHERE condition.
    pub fn and_where(self, condition: impl Into<Condition>) -> Self {
        let condition: Condition = condition.into();
        self.filter(condition.and())
    }

    /// Add an OR WHERE condition.
    pub fn or_where(self, condition: impl Into<Condition>) -> Self {
        let condition: Condition = condition.into();
        self.filter(condition.or())
    }

    /// Add a `column = 'value'` WHERE shorthand.
    pub fn where_pair(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(ConditionEntry::pair(column, value))
    }

    /// Append GROUP BY columns.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add an AND HAVING condition.
    pub fn and_having(mut self, condition: impl Into<Condition>) -> Self {
        let condition: Condition = condition.into();
        self.having.push(condition.and().into());
        self
    }

    /// Add an OR HAVING condition.
    pub fn or_having(mut self, condition: impl Into<Condition>) -> Self {
        let condition: Condition = condition.into();
        self.having.push(condition.or().into());
        self
    }

    /// Add an ORDER BY term.
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn order_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Asc)
    }

    pub fn order_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Desc)
    }
}

impl SafeSql {
    /// Formatted names with blank entries left out. A blank entry is still
    /// reported, and fails the call in strict mode.
    fn format_names(&self, names: &[String]) -> SqlResult<Vec<String>> {
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let name = self.format_name(name)?;
            if !name.is_empty() {
                out.push(name);
            }
        }
        Ok(out)
    }

    /// Assemble a SELECT statement from its description.
    ///
    /// Blank names in the field, join, group and order lists are dropped
    /// after being reported, so a clause whose entries are all blank is
    /// omitted.
    pub fn select(&self, query: &SelectQuery) -> SqlResult<String> {
        let mut clauses: Vec<String> = Vec::new();

        let fields = self.format_names(&query.fields)?;
        if !fields.is_empty() {
            clauses.push(format!("SELECT {}", fields.join(", ")));
        }
        if !query.from.trim().is_empty() {
            clauses.push(format!("FROM {}", self.format_name(&query.from)?));
        }
        for join in &query.joins {
            let table = self.format_name(&join.table)?;
            if table.is_empty() {
                continue;
            }
            clauses.push(format!("{} {table} ON ({})", join.kind.keyword(), join.on));
        }
        if !query.conditions.is_empty() {
            clauses.push(format!("WHERE {}", self.render_entries(&query.conditions)?));
        }
        let group_by = self.format_names(&query.group_by)?;
        if !group_by.is_empty() {
            clauses.push(format!("GROUP BY {}", group_by.join(", ")));
        }
        if !query.having.is_empty() {
            clauses.push(format!("HAVING {}", self.render_entries(&query.having)?));
        }
        let mut terms = Vec::with_capacity(query.order_by.len());
        for order in &query.order_by {
            let column = self.format_name(&order.column)?;
            if !column.is_empty() {
                terms.push(format!("{column} {}", order.direction.keyword()));
            }
        }
        if !terms.is_empty() {
            clauses.push(format!("ORDER BY {}", terms.join(", ")));
        }

        let sql = clauses.join(" ");
        tracing::trace!(target: "safesql", sql = %sql, "assembled select");
        Ok(sql)
    }
}
