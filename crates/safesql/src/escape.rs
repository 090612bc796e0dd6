//! Driver-facing escaping primitives.
//!
//! An [`Escaper`] is the thin seam to whatever the database driver offers for
//! making text safe inside a single-quoted literal or a backtick-quoted
//! identifier. The builder never quotes anything without going through it.

use crate::error::SqlResult;

/// String escaping and identifier quoting supplied by the driver.
///
/// Both operations return the escaped *body*; the caller adds the surrounding
/// quotes. Implementations backed by a live connection should map driver
/// failures to [`SqlError::Connection`](crate::SqlError::Connection).
pub trait Escaper: Send + Sync {
    /// Escape `raw` for inclusion between single quotes.
    fn escape_string(&self, raw: &str) -> SqlResult<String>;

    /// Escape `raw` for inclusion between backticks.
    fn quote_identifier(&self, raw: &str) -> SqlResult<String> {
        Ok(raw.replace('`', "``"))
    }
}

/// Connection-free escaper following `mysql_real_escape_string` for
/// ASCII-compatible character sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlEscaper;

impl Escaper for MysqlEscaper {
    fn escape_string(&self, raw: &str) -> SqlResult<String> {
        let mut out = String::with_capacity(raw.len() + 2);
        for ch in raw.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_backslashes() {
        let e = MysqlEscaper;
        assert_eq!(e.escape_string("O'Brien").unwrap(), "O\\'Brien");
        assert_eq!(e.escape_string(r#"a\b"c"#).unwrap(), r#"a\\b\"c"#);
    }

    #[test]
    fn escapes_control_characters() {
        let e = MysqlEscaper;
        assert_eq!(
            e.escape_string("a\0b\nc\rd\x1a").unwrap(),
            "a\\0b\\nc\\rd\\Z"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(MysqlEscaper.escape_string("héllo wörld").unwrap(), "héllo wörld");
    }

    #[test]
    fn identifier_doubles_backticks() {
        assert_eq!(MysqlEscaper.quote_identifier("we`ird").unwrap(), "we``ird");
    }
}
