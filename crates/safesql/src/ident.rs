//! SQL identifier handling.
//!
//! A [`Name`] is what `?n` placeholders and statement descriptions use for
//! tables and columns. It accepts three spellings:
//!
//! - plain: `users` renders as `` `users` ``
//! - dotted: `db.users` renders as `` `db`.`users` ``
//! - aliased: `users u` or `name AS n` renders as `` `users` u``; only the first
//!   whitespace-delimited token is quoted and the rest is kept verbatim
//!
//! # Example
//! ```ignore
//! use safesql::{Name, MysqlEscaper};
//!
//! let n = Name::parse("db.users u").unwrap();
//! assert_eq!(n.to_sql(&MysqlEscaper)?, "`db`.`users` u");
//! # Ok::<(), safesql::SqlError>(())
//! ```

use crate::error::SqlResult;
use crate::escape::Escaper;

/// A possibly qualified, possibly aliased SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Dot-separated parts of the identifier token.
    pub parts: Vec<String>,
    /// Everything after the identifier token, leading whitespace included.
    pub suffix: String,
}

impl Name {
    /// Parse a name. Returns `None` when `s` is empty after trimming.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let (ident, suffix) = match s.find(char::is_whitespace) {
            Some(pos) => s.split_at(pos),
            None => (s, ""),
        };

        Some(Self {
            parts: ident.split('.').map(str::to_string).collect(),
            suffix: suffix.to_string(),
        })
    }

    /// Render the name, quoting every part through `escaper`.
    pub fn to_sql(&self, escaper: &dyn Escaper) -> SqlResult<String> {
        let mut out = String::with_capacity(
            self.parts.iter().map(|p| p.len() + 3).sum::<usize>() + self.suffix.len(),
        );
        self.write_sql(escaper, &mut out)?;
        Ok(out)
    }

    pub(crate) fn write_sql(&self, escaper: &dyn Escaper, out: &mut String) -> SqlResult<()> {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push('`');
            out.push_str(&escaper.quote_identifier(part)?);
            out.push('`');
        }
        out.push_str(&self.suffix);
        Ok(())
    }
}

/// Quote `raw` as a single identifier: no dot splitting, no alias handling.
pub(crate) fn quote_whole(escaper: &dyn Escaper, raw: &str) -> SqlResult<String> {
    Ok(format!("`{}`", escaper.quote_identifier(raw)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::MysqlEscaper;

    fn render(s: &str) -> String {
        Name::parse(s).unwrap().to_sql(&MysqlEscaper).unwrap()
    }

    #[test]
    fn name_simple() {
        assert_eq!(render("users"), "`users`");
    }

    #[test]
    fn name_trims() {
        assert_eq!(render("  users \t"), "`users`");
    }

    #[test]
    fn name_dotted() {
        assert_eq!(render("db.table"), "`db`.`table`");
        assert_eq!(render("db.table.col"), "`db`.`table`.`col`");
    }

    #[test]
    fn name_alias_kept_verbatim() {
        assert_eq!(render("col AS alias"), "`col` AS alias");
        assert_eq!(render("table t"), "`table` t");
        assert_eq!(render("db.users  u"), "`db`.`users`  u");
    }

    #[test]
    fn name_escapes_backticks() {
        assert_eq!(render("we`ird"), "`we``ird`");
        assert_eq!(render("a`.b"), "`a```.`b`");
    }

    #[test]
    fn name_rejects_empty() {
        assert!(Name::parse("").is_none());
        assert!(Name::parse("   ").is_none());
    }

    #[test]
    fn whole_quote_ignores_dots_and_spaces() {
        assert_eq!(quote_whole(&MysqlEscaper, "a.b c").unwrap(), "`a.b c`");
    }
}
