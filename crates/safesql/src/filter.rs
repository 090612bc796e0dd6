//! Filtering of caller input that ends up in places placeholders cannot
//! protect on their own.

use crate::value::Value;
use indexmap::IndexMap;

/// `input` if it is one of `allowed`, otherwise `default`.
///
/// Meant for keywords and names picked by the caller, such as a sort
/// column or direction:
///
/// ```ignore
/// let dir = white_list(params.dir, &["ASC", "DESC"], "ASC");
/// let col = white_list(params.sort, &["name", "price", "qty"], "name");
/// db.substitute(&format!("SELECT * FROM t ORDER BY ?n {dir}"), &args![col])?;
/// ```
pub fn white_list<'a>(input: &str, allowed: &[&'a str], default: &'a str) -> &'a str {
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == input)
        .unwrap_or(default)
}

/// The entries of `input` whose key is in `allowed`, in `input` order.
///
/// Use it before handing user-submitted data to a `?u` placeholder so that
/// only known columns can be written.
pub fn filter_map(input: &IndexMap<String, Value>, allowed: &[&str]) -> IndexMap<String, Value> {
    input
        .iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
