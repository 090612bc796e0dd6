//! Per-type value formatting.
//!
//! Every rendered literal is either numeric-coerced (integer, float) or
//! escaped and single-quoted (string, binary). `NULL` values render as the
//! `NULL` keyword. Identifiers go through [`Name`](crate::Name) instead.

use crate::error::{SqlError, SqlResult};
use crate::ident::{Name, quote_whole};
use crate::safe_sql::SafeSql;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

const NULL: &str = "NULL";

/// The declared type of a value in a statement description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    #[serde(alias = "int")]
    Integer,
    /// Also spelled `double` or `decimal`.
    #[serde(alias = "double", alias = "decimal")]
    Float,
    String,
    Binary,
}

impl DeclaredType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredType::Integer => "integer",
            DeclaredType::Float => "float",
            DeclaredType::String => "string",
            DeclaredType::Binary => "binary",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclaredType {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(DeclaredType::Integer),
            "float" | "double" | "decimal" => Ok(DeclaredType::Float),
            "string" => Ok(DeclaredType::String),
            "binary" => Ok(DeclaredType::Binary),
            _ => Err(SqlError::UnknownPlaceholderType(s.to_string())),
        }
    }
}

fn mismatch(expected: &'static str, value: &Value) -> SqlError {
    SqlError::type_mismatch(expected, value.type_name())
}

fn strict_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Int(n) => Some(*n),
        Value::Float(f) => Some(truncate(*f)),
        Value::Str(s) => {
            let s = s.trim();
            Some(
                s.parse::<i64>()
                    .ok()
                    .or_else(|| finite(s.parse::<f64>().ok()).map(truncate))
                    .unwrap_or(0),
            )
        }
        Value::List(_) | Value::Map(_) => None,
    }
}

fn strict_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => finite(Some(*f)),
        Value::Str(s) => finite(s.trim().parse().ok()),
        _ => None,
    }
}

fn lenient_float(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(finite(Some(*f)).unwrap_or(0.0)),
        Value::Str(s) => Some(finite(s.trim().parse().ok()).unwrap_or(0.0)),
        Value::List(_) | Value::Map(_) => None,
    }
}

fn finite(f: Option<f64>) -> Option<f64> {
    f.filter(|f| f.is_finite())
}

/// Saturating truncation toward zero; NaN becomes 0.
fn truncate(f: f64) -> i64 {
    f.trunc() as i64
}

/// Fixed-point rendering with exactly `precision` decimals, halves rounded
/// away from zero.
///
/// Rounding works on the shortest decimal text of `f`, so `1.005` at two
/// decimals is `1.01` even though the nearest double is slightly below it.
pub(crate) fn fixed_point(f: f64, precision: u32) -> String {
    if !f.is_finite() {
        return fixed_point(0.0, precision);
    }
    let precision = precision as usize;
    let text = f.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    if frac_part.len() <= precision {
        digits.extend(frac_part.bytes());
        digits.resize(int_part.len() + precision, b'0');
    } else {
        digits.extend(frac_part[..precision].bytes());
        if frac_part.as_bytes()[precision] >= b'5' {
            round_up(&mut digits);
        }
    }

    let int_len = digits.len() - precision;
    let negative = f.is_sign_negative() && digits.iter().any(|d| *d != b'0');
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| char::from(*d)));
    if precision > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| char::from(*d)));
    }
    out
}

/// Add one unit in the last place of a run of ASCII digits.
fn round_up(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// A bare scalar where a set was expected becomes a one-element list.
pub(crate) fn promote_to_list(value: &Value) -> Vec<Value> {
    vec![value.clone()]
}

/// A bare scalar where a field map was expected becomes a single pair under
/// the key `0`.
pub(crate) fn promote_to_pairs(value: &Value) -> Vec<(String, Value)> {
    vec![("0".to_string(), value.clone())]
}

impl SafeSql {
    /// Format `value` according to its declared type.
    ///
    /// `precision` is only used for [`DeclaredType::Float`].
    pub fn format_value(
        &self,
        value: &Value,
        ty: DeclaredType,
        precision: u32,
    ) -> SqlResult<String> {
        match ty {
            DeclaredType::Integer => self.format_int(value),
            DeclaredType::Float => self.format_float(value, precision),
            DeclaredType::String | DeclaredType::Binary => self.format_string(value),
        }
    }

    /// Like [`format_value`](Self::format_value) with the type given as a tag
    /// (`integer`, `float`, `double`, `decimal`, `string`, `binary`).
    ///
    /// An unknown tag is reported as `UnknownPlaceholderType`; lenient mode
    /// then yields the empty string.
    pub fn format_tagged(&self, value: &Value, tag: &str, precision: u32) -> SqlResult<String> {
        match tag.parse::<DeclaredType>() {
            Ok(ty) => self.format_value(value, ty, precision),
            Err(err) => self.recover(err, None, || Ok(String::new())),
        }
    }

    /// Integer literal. Lenient mode coerces non-numeric input to `0`.
    pub fn format_int(&self, value: &Value) -> SqlResult<String> {
        if value.is_null() {
            return Ok(NULL.to_string());
        }
        let n = if self.is_strict() {
            strict_int(value)
        } else {
            lenient_int(value)
        };
        match n {
            Some(n) => Ok(n.to_string()),
            None => self.recover(mismatch("integer", value), None, || Ok("0".to_string())),
        }
    }

    /// Fixed-point literal with exactly `precision` decimals, halves rounded
    /// away from zero. Lenient mode coerces non-numeric input to `0`.
    pub fn format_float(&self, value: &Value, precision: u32) -> SqlResult<String> {
        if value.is_null() {
            return Ok(NULL.to_string());
        }
        let f = if self.is_strict() {
            strict_float(value)
        } else {
            lenient_float(value)
        };
        match f {
            Some(f) => Ok(fixed_point(f, precision)),
            None => self.recover(mismatch("float", value), None, || {
                Ok(fixed_point(0.0, precision))
            }),
        }
    }

    /// Escaped, single-quoted string literal.
    ///
    /// Lists and maps are a type mismatch; lenient mode quotes their JSON
    /// text instead.
    pub fn format_string(&self, value: &Value) -> SqlResult<String> {
        if value.is_null() {
            return Ok(NULL.to_string());
        }
        match value.scalar_text() {
            Some(text) => self.quote(&text),
            None => self.recover(mismatch("string", value), None, || {
                self.quote(&value.to_text())
            }),
        }
    }

    /// Backtick-quoted identifier; see [`Name`] for the accepted spellings.
    ///
    /// Everything after the first whitespace is kept verbatim as an alias, so
    /// a name taken from user input must be checked with
    /// [`white_list`](crate::white_list) before it gets here.
    pub fn format_name(&self, name: &str) -> SqlResult<String> {
        match Name::parse(name) {
            Some(name) => name
                .to_sql(self.escaper_ref())
                .inspect_err(|err| self.report(err, None)),
            None => self.recover(
                SqlError::type_mismatch("identifier", "empty name"),
                None,
                || Ok(String::new()),
            ),
        }
    }

    pub(crate) fn format_name_value(&self, value: &Value) -> SqlResult<String> {
        match value {
            Value::Str(s) => self.format_name(s),
            Value::Int(_) | Value::Float(_) => self.format_name(&value.to_text()),
            _ => self.recover(mismatch("identifier", value), None, || Ok(String::new())),
        }
    }

    /// Parenthesized, comma-separated list of string literals for `IN (...)`.
    ///
    /// An empty list renders `()`. In lenient mode a map contributes its
    /// values and a bare scalar is promoted to a one-element list; strict mode
    /// rejects both.
    pub fn format_set(&self, value: &Value) -> SqlResult<String> {
        let items: Cow<'_, [Value]> = match value {
            Value::List(items) => Cow::Borrowed(items.as_slice()),
            _ if self.is_strict() => {
                return self.recover(mismatch("list", value), None, || Ok("()".to_string()));
            }
            Value::Map(map) => Cow::Owned(map.values().cloned().collect()),
            scalar => Cow::Owned(promote_to_list(scalar)),
        };

        let mut out = String::from("(");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.format_string(item)?);
        }
        out.push(')');
        Ok(out)
    }

    /// Comma-separated `` `key` = 'value' `` pairs in mapping order.
    ///
    /// An empty map renders the empty string. In lenient mode a list is keyed
    /// by position and a bare scalar is promoted to a single pair under key
    /// `0`; strict mode rejects both.
    pub fn format_map(&self, value: &Value) -> SqlResult<String> {
        let pairs: Vec<(Cow<'_, str>, Cow<'_, Value>)> = match value {
            Value::Map(map) => map
                .iter()
                .map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v)))
                .collect(),
            _ if self.is_strict() => {
                return self.recover(mismatch("map", value), None, || Ok(String::new()));
            }
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (Cow::Owned(i.to_string()), Cow::Borrowed(v)))
                .collect(),
            scalar => promote_to_pairs(scalar)
                .into_iter()
                .map(|(k, v)| (Cow::Owned(k), Cow::Owned(v)))
                .collect(),
        };

        let mut out = String::new();
        for (i, (key, val)) in pairs.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let key =
                quote_whole(self.escaper_ref(), key).inspect_err(|err| self.report(err, None))?;
            out.push_str(&key);
            out.push_str(" = ");
            out.push_str(&self.format_string(val)?);
        }
        Ok(out)
    }

    /// The value's own text, unescaped. The caller vouches for its safety.
    pub fn format_raw(&self, value: &Value) -> SqlResult<String> {
        match value.scalar_text() {
            Some(text) => Ok(text),
            None => self.recover(mismatch("raw text", value), None, || Ok(value.to_text())),
        }
    }
}
