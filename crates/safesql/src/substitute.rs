//! Template substitution.

use crate::error::{SqlError, SqlResult};
use crate::format::fixed_point;
use crate::placeholder::{Placeholder, Token, tokenize};
use crate::safe_sql::SafeSql;
use crate::value::Value;

/// What a placeholder renders as when it has no argument and the builder is
/// lenient.
fn missing_argument(kind: Placeholder) -> String {
    match kind {
        Placeholder::Int => "0".to_string(),
        Placeholder::Float { precision } => fixed_point(0.0, precision),
        Placeholder::Str => "''".to_string(),
        Placeholder::Set => "()".to_string(),
        Placeholder::Ident | Placeholder::Map | Placeholder::Raw => String::new(),
    }
}

impl SafeSql {
    /// Replace every placeholder in `template` with the next argument,
    /// formatted for the placeholder's kind.
    ///
    /// Arguments are consumed strictly left to right. Running out of arguments
    /// is an `ArgumentCountMismatch`: strict mode returns it, lenient mode
    /// reports it once and renders the remaining placeholders as `0`, `''`,
    /// `()` or nothing. Surplus arguments are ignored unless the builder is
    /// strict.
    pub fn substitute(&self, template: &str, args: &[Value]) -> SqlResult<String> {
        let tokens = tokenize(template);
        let placeholders = tokens.iter().filter(|t| t.is_placeholder()).count();
        let count_mismatch = || SqlError::ArgumentCountMismatch {
            placeholders,
            arguments: args.len(),
        };

        let mut out = String::with_capacity(template.len() + args.len() * 8);
        let mut cursor = 0;
        for token in tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Placeholder(kind) => {
                    let rendered = match args.get(cursor) {
                        Some(arg) => self.format_placeholder(kind, arg)?,
                        // reported once, on the first missing argument
                        None if cursor > args.len() => missing_argument(kind),
                        None => self.recover(count_mismatch(), Some(template), || {
                            Ok(missing_argument(kind))
                        })?,
                    };
                    out.push_str(&rendered);
                    cursor += 1;
                }
            }
        }

        if self.is_strict() && args.len() > placeholders {
            let err = count_mismatch();
            self.report(&err, Some(template));
            return Err(err);
        }

        tracing::trace!(target: "safesql", sql = %out, "substituted template");
        Ok(out)
    }

    fn format_placeholder(&self, kind: Placeholder, arg: &Value) -> SqlResult<String> {
        match kind {
            Placeholder::Ident => self.format_name_value(arg),
            Placeholder::Str => self.format_string(arg),
            Placeholder::Int => self.format_int(arg),
            Placeholder::Float { precision } => self.format_float(arg, precision),
            Placeholder::Set => self.format_set(arg),
            Placeholder::Map => self.format_map(arg),
            Placeholder::Raw => self.format_raw(arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::error::ErrorKind;
    use crate::report::CollectingReporter;
    use std::sync::Arc;

    fn lenient() -> (SafeSql, Arc<CollectingReporter>) {
        let reporter = Arc::new(CollectingReporter::new());
        (SafeSql::new().reporter_arc(reporter.clone()), reporter)
    }

    fn strict() -> (SafeSql, Arc<CollectingReporter>) {
        let reporter = Arc::new(CollectingReporter::new());
        (SafeSql::strict().reporter_arc(reporter.clone()), reporter)
    }

    #[test]
    fn identifier_and_integer() {
        let (db, _) = lenient();
        assert_eq!(
            db.substitute("SELECT * FROM ?n WHERE id = ?i", &args!["users", 5])
                .unwrap(),
            "SELECT * FROM `users` WHERE id = 5"
        );
    }

    #[test]
    fn string_is_escaped() {
        let (db, _) = lenient();
        assert_eq!(db.substitute("?s", &args!["O'Brien"]).unwrap(), r"'O\'Brien'");
    }

    #[test]
    fn every_kind() {
        let (db, _) = lenient();
        let map: crate::Value = [("name", "x")].into_iter().collect();
        let sql = db
            .substitute(
                "UPDATE ?n SET ?u, price = ?2f WHERE id IN ?a AND ts < ?p AND n = ?i AND s = ?s",
                &args!["t", map, 9.999, vec![1, 2], "NOW()", "12", 3],
            )
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE `t` SET `name` = 'x', price = 10.00 WHERE id IN ('1', '2') AND ts < NOW() AND n = 12 AND s = '3'"
        );
    }

    #[test]
    fn literal_text_passes_through() {
        let (db, _) = lenient();
        let text = "SELECT 'a ? b', \"?x\" FROM t WHERE c = '?2'";
        assert_eq!(db.substitute(text, &[]).unwrap(), text);
    }

    #[test]
    fn lenient_missing_arguments_report_once() {
        let (db, reporter) = lenient();
        let sql = db.substitute("?i ?s ?a ?2f", &args![1]).unwrap();
        assert_eq!(sql, "1 '' () 0.00");
        assert_eq!(reporter.kinds(), vec![ErrorKind::ArgumentCountMismatch]);
        assert_eq!(reporter.reports()[0].sql.as_deref(), Some("?i ?s ?a ?2f"));
    }

    #[test]
    fn strict_missing_argument_fails() {
        let (db, reporter) = strict();
        let err = db.substitute("?i ?i", &args![1]).unwrap_err();
        assert_eq!(
            err,
            SqlError::ArgumentCountMismatch {
                placeholders: 2,
                arguments: 1
            }
        );
        assert_eq!(reporter.kinds(), vec![ErrorKind::ArgumentCountMismatch]);
    }

    #[test]
    fn surplus_arguments() {
        let (db, reporter) = lenient();
        assert_eq!(db.substitute("?i", &args![1, 2, 3]).unwrap(), "1");
        assert!(reporter.is_empty());

        let (db, _) = strict();
        assert!(
            db.substitute("?i", &args![1, 2])
                .unwrap_err()
                .is_argument_count_mismatch()
        );
    }

    #[test]
    fn strict_type_mismatch_aborts() {
        let (db, _) = strict();
        assert!(
            db.substitute("a = ?i AND b = ?s", &args!["x", "y"])
                .unwrap_err()
                .is_type_mismatch()
        );
    }

    #[test]
    fn lenient_type_mismatch_continues() {
        let (db, reporter) = lenient();
        assert_eq!(
            db.substitute("a = ?i AND b = ?s", &args![vec![1], "y"])
                .unwrap(),
            "a = 0 AND b = 'y'"
        );
        assert_eq!(reporter.kinds(), vec![ErrorKind::TypeMismatch]);
    }
}
