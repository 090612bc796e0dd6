//! Template tokenizer.
//!
//! A template is plain SQL text with `?`-triggered markers:
//!
//! | marker | kind | argument |
//! |--------|------|----------|
//! | `?n`   | identifier | name, optionally `db.table` or `col alias`; see below |
//! | `?s`   | string | scalar, quoted and escaped |
//! | `?i`   | integer | scalar, coerced to an integer |
//! | `?f`, `?2f` | float | scalar, fixed-point with the embedded number of decimals |
//! | `?a`   | set | list, rendered as `('a', 'b')` |
//! | `?u`   | field map | map, rendered as `` `k` = 'v', ... `` |
//! | `?p`   | raw | inserted verbatim |
//!
//! Only the first whitespace-delimited token of a `?n` argument is quoted;
//! the rest is emitted verbatim. Identifiers that come from user input must
//! be checked with [`white_list`](crate::white_list) first.
//!
//! Letter markers and float markers are matched in two passes: the template is
//! first split on letter markers, then every literal segment between them is
//! split again on float markers.

use regex::Regex;
use std::sync::OnceLock;

/// The kind of a placeholder marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `?n`
    Ident,
    /// `?s`
    Str,
    /// `?i`
    Int,
    /// `?f` / `?<digits>f`
    Float { precision: u32 },
    /// `?a`
    Set,
    /// `?u`
    Map,
    /// `?p`
    Raw,
}

impl Placeholder {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "n" => Some(Placeholder::Ident),
            "s" => Some(Placeholder::Str),
            "i" => Some(Placeholder::Int),
            "a" => Some(Placeholder::Set),
            "u" => Some(Placeholder::Map),
            "p" => Some(Placeholder::Raw),
            _ => None,
        }
    }

    /// The marker text as it would appear in a template.
    pub fn marker(&self) -> String {
        match self {
            Placeholder::Ident => "?n".into(),
            Placeholder::Str => "?s".into(),
            Placeholder::Int => "?i".into(),
            Placeholder::Float { precision: 0 } => "?f".into(),
            Placeholder::Float { precision } => format!("?{precision}f"),
            Placeholder::Set => "?a".into(),
            Placeholder::Map => "?u".into(),
            Placeholder::Raw => "?p".into(),
        }
    }
}

/// One piece of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    Placeholder(Placeholder),
}

impl Token<'_> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Token::Placeholder(_))
    }
}

fn letter_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\?([nsiuap])").expect("invalid built-in letter marker regex"))
}

fn float_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\?([0-9]*)f").expect("invalid built-in float marker regex"))
}

/// Split `template` into literal and placeholder tokens, in order.
///
/// Empty literals are never emitted. A `?` that does not start a recognized
/// marker stays part of the surrounding literal.
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in letter_marker().captures_iter(template) {
        let (Some(whole), Some(letter)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(kind) = Placeholder::from_letter(letter.as_str()) else {
            continue;
        };
        split_floats(&template[last..whole.start()], &mut tokens);
        tokens.push(Token::Placeholder(kind));
        last = whole.end();
    }
    split_floats(&template[last..], &mut tokens);

    tokens
}

fn split_floats<'a>(segment: &'a str, tokens: &mut Vec<Token<'a>>) {
    let mut last = 0;

    for caps in float_marker().captures_iter(segment) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        // a precision that does not fit stays part of the literal
        let Some(precision) = parse_precision(digits.as_str()) else {
            continue;
        };
        push_literal(&segment[last..whole.start()], tokens);
        tokens.push(Token::Placeholder(Placeholder::Float { precision }));
        last = whole.end();
    }
    push_literal(&segment[last..], tokens);
}

fn push_literal<'a>(text: &'a str, tokens: &mut Vec<Token<'a>>) {
    if !text.is_empty() {
        tokens.push(Token::Literal(text));
    }
}

fn parse_precision(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

/// Number of placeholders in `template`.
pub fn count_placeholders(template: &str) -> usize {
    tokenize(template)
        .iter()
        .filter(|t| t.is_placeholder())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Placeholder::*;

    fn lit(s: &str) -> Token<'_> {
        Token::Literal(s)
    }

    fn ph(kind: Placeholder) -> Token<'static> {
        Token::Placeholder(kind)
    }

    #[test]
    fn letter_markers() {
        assert_eq!(
            tokenize("SELECT * FROM ?n WHERE id = ?i"),
            vec![lit("SELECT * FROM "), ph(Ident), lit(" WHERE id = "), ph(Int)]
        );
    }

    #[test]
    fn all_letters() {
        assert_eq!(
            tokenize("?n?s?i?u?a?p"),
            vec![ph(Ident), ph(Str), ph(Int), ph(Map), ph(Set), ph(Raw)]
        );
    }

    #[test]
    fn float_markers_with_and_without_precision() {
        assert_eq!(
            tokenize("a = ?f, b = ?2f, c = ?10f"),
            vec![
                lit("a = "),
                ph(Float { precision: 0 }),
                lit(", b = "),
                ph(Float { precision: 2 }),
                lit(", c = "),
                ph(Float { precision: 10 }),
            ]
        );
    }

    #[test]
    fn mixed_grammars_keep_order() {
        assert_eq!(
            tokenize("?s ?3f ?i ?f"),
            vec![
                ph(Str),
                lit(" "),
                ph(Float { precision: 3 }),
                lit(" "),
                ph(Int),
                lit(" "),
                ph(Float { precision: 0 }),
            ]
        );
    }

    #[test]
    fn unrecognized_trigger_is_literal() {
        assert_eq!(tokenize("a ? b ?x ?2 ?2n"), vec![lit("a ? b ?x ?2 ?2n")]);
        assert_eq!(tokenize("??i"), vec![lit("?"), ph(Int)]);
    }

    #[test]
    fn no_markers_is_single_literal() {
        assert_eq!(tokenize("SELECT 1"), vec![lit("SELECT 1")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn letter_right_after_marker_is_literal() {
        // `?nf`: identifier marker followed by a literal `f`
        assert_eq!(tokenize("?nf"), vec![ph(Ident), lit("f")]);
    }

    #[test]
    fn precision_is_kept_as_written() {
        assert_eq!(
            tokenize("?45f ?007f"),
            vec![
                ph(Float { precision: 45 }),
                lit(" "),
                ph(Float { precision: 7 }),
            ]
        );
    }

    #[test]
    fn oversized_precision_is_literal() {
        assert_eq!(
            tokenize("?99999999999999f ?i"),
            vec![lit("?99999999999999f "), ph(Int)]
        );
    }

    #[test]
    fn counts_placeholders() {
        assert_eq!(count_placeholders("?i ?2f ?s plain ?"), 3);
    }

    #[test]
    fn markers_round_trip() {
        for kind in [Ident, Str, Int, Float { precision: 0 }, Float { precision: 4 }, Set, Map, Raw] {
            assert_eq!(tokenize(&kind.marker()), vec![ph(kind)]);
        }
    }
}
