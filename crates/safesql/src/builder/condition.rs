//! Field assignments and WHERE/HAVING conditions shared by the assemblers.

use crate::error::SqlResult;
use crate::format::DeclaredType;
use crate::safe_sql::SafeSql;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A typed `column = value` term, used for SET lists and AND-only conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: DeclaredType,
    pub value: Value,
    /// Decimals for float values.
    #[serde(default)]
    pub decimals: u32,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: DeclaredType, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            value: value.into(),
            decimals: 0,
        }
    }

    pub fn int(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, DeclaredType::Integer, value)
    }

    pub fn float(name: impl Into<String>, value: impl Into<Value>, decimals: u32) -> Self {
        Self::new(name, DeclaredType::Float, value).decimals(decimals)
    }

    pub fn string(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, DeclaredType::String, value)
    }

    pub fn binary(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, DeclaredType::Binary, value)
    }

    /// Set the number of decimals used for float values.
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }
}

/// Boolean connector placed before a condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connector {
    #[default]
    #[serde(alias = "and")]
    And,
    #[serde(alias = "or")]
    Or,
}

impl Connector {
    pub fn keyword(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// A typed WHERE/HAVING condition with its connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: DeclaredType,
    pub value: Value,
    #[serde(default)]
    pub decimals: u32,
    /// Connector to the previous condition; ignored on the first one.
    #[serde(default)]
    pub connector: Connector,
}

impl Condition {
    pub fn new(name: impl Into<String>, ty: DeclaredType, value: impl Into<Value>) -> Self {
        Field::new(name, ty, value).into()
    }

    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Join to the previous condition with `OR`.
    pub fn or(mut self) -> Self {
        self.connector = Connector::Or;
        self
    }

    /// Join to the previous condition with `AND` (the default).
    pub fn and(mut self) -> Self {
        self.connector = Connector::And;
        self
    }
}

impl From<Field> for Condition {
    fn from(field: Field) -> Self {
        Self {
            name: field.name,
            ty: field.ty,
            value: field.value,
            decimals: field.decimals,
            connector: Connector::And,
        }
    }
}

/// One entry of a WHERE/HAVING list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionEntry {
    /// Typed condition with an explicit connector.
    Typed(Condition),
    /// Shorthand `column = 'value'`: always a string literal, always AND.
    Pair(String, Value),
}

impl ConditionEntry {
    pub fn pair(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Pair(name.into(), value.into())
    }

    fn connector(&self) -> Connector {
        match self {
            ConditionEntry::Typed(c) => c.connector,
            ConditionEntry::Pair(..) => Connector::And,
        }
    }
}

impl From<Condition> for ConditionEntry {
    fn from(c: Condition) -> Self {
        Self::Typed(c)
    }
}

impl From<Field> for ConditionEntry {
    fn from(f: Field) -> Self {
        Self::Typed(f.into())
    }
}

/// Conditions of a DELETE: a typed AND-list, or hand-written SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Conditions {
    /// Appended verbatim after `WHERE `. The caller vouches for its safety.
    Raw(String),
    List(Vec<Field>),
}

impl Conditions {
    /// No conditions at all.
    pub fn none() -> Self {
        Self::List(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Conditions::Raw(sql) => sql.trim().is_empty(),
            Conditions::List(fields) => fields.is_empty(),
        }
    }
}

impl Default for Conditions {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Field>> for Conditions {
    fn from(fields: Vec<Field>) -> Self {
        Self::List(fields)
    }
}

impl From<&str> for Conditions {
    fn from(sql: &str) -> Self {
        Self::Raw(sql.to_string())
    }
}

impl From<String> for Conditions {
    fn from(sql: String) -> Self {
        Self::Raw(sql)
    }
}

impl SafeSql {
    fn render_term(
        &self,
        name: &str,
        ty: DeclaredType,
        value: &Value,
        decimals: u32,
    ) -> SqlResult<String> {
        Ok(format!(
            "{} = {}",
            self.format_name(name)?,
            self.format_value(value, ty, decimals)?
        ))
    }

    pub(crate) fn render_field(&self, field: &Field) -> SqlResult<String> {
        self.render_term(&field.name, field.ty, &field.value, field.decimals)
    }

    /// `a = 1<sep>b = 2...`
    pub(crate) fn render_fields(&self, fields: &[Field], sep: &str) -> SqlResult<String> {
        let terms = fields
            .iter()
            .map(|f| self.render_field(f))
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(terms.join(sep))
    }

    /// WHERE/HAVING body: entries joined by their own connectors, the first
    /// connector dropped.
    pub(crate) fn render_entries(&self, entries: &[ConditionEntry]) -> SqlResult<String> {
        let mut out = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(entry.connector().keyword());
                out.push(' ');
            }
            let term = match entry {
                ConditionEntry::Typed(c) => {
                    self.render_term(&c.name, c.ty, &c.value, c.decimals)?
                }
                ConditionEntry::Pair(name, value) => {
                    self.render_term(name, DeclaredType::String, value, 0)?
                }
            };
            out.push_str(&term);
        }
        Ok(out)
    }
}
