//! Declarative statement assemblers.
//!
//! Each assembler turns a description into one complete SQL string; nothing
//! is executed. Every value goes through the value formatter with its
//! declared type and every table/column name through the identifier
//! formatter, so only join `ON` text and raw DELETE conditions are emitted
//! unescaped.

pub mod condition;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use condition::{Condition, ConditionEntry, Conditions, Connector, Field};
pub use select::{Direction, Join, JoinKind, OrderBy, SelectQuery};

use crate::error::SqlResult;
use crate::safe_sql::SafeSql;
use serde::{Deserialize, Serialize};

/// Any statement description, tagged by `statement` when (de)serialized.
///
/// ```json
/// {"statement": "update", "table": "t",
///  "fields": [{"name": "price", "type": "float", "value": 9.999, "decimals": 2}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "statement", rename_all = "lowercase")]
pub enum Statement {
    Insert {
        table: String,
        fields: Vec<Field>,
    },
    Update {
        table: String,
        fields: Vec<Field>,
        #[serde(default)]
        conditions: Vec<Field>,
    },
    Delete {
        table: String,
        #[serde(default)]
        conditions: Conditions,
    },
    Select(SelectQuery),
}

impl SafeSql {
    /// Assemble any statement description.
    pub fn build(&self, statement: &Statement) -> SqlResult<String> {
        match statement {
            Statement::Insert { table, fields } => self.insert(table, fields),
            Statement::Update {
                table,
                fields,
                conditions,
            } => self.update(table, fields, conditions),
            Statement::Delete { table, conditions } => self.delete(table, conditions),
            Statement::Select(query) => self.select(query),
        }
    }
}
