use proptest::prelude::*;
use safesql::{NoopReporter, SafeSql, Value, args};

fn db() -> SafeSql {
    SafeSql::strict().reporter(NoopReporter)
}

/// Undo `mysql_real_escape_string` the way the server reads a quoted literal.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('Z') => out.push('\x1a'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// `true` when every `'` in `body` is preceded by an unescaped backslash.
fn quotes_are_escaped(body: &str) -> bool {
    let mut escaped = false;
    for c in body.chars() {
        match c {
            '\\' => escaped = !escaped,
            '\'' if !escaped => return false,
            _ => escaped = false,
        }
    }
    !escaped
}

proptest! {
    #[test]
    fn string_literal_round_trips(s in any::<String>()) {
        let sql = db().substitute("?s", &args![s.clone()]).unwrap();
        prop_assert!(sql.len() >= 2);
        prop_assert!(sql.starts_with('\'') && sql.ends_with('\''));
        let body = &sql[1..sql.len() - 1];
        prop_assert!(quotes_are_escaped(body));
        prop_assert_eq!(unescape(body), s);
    }

    #[test]
    fn control_characters_round_trip(s in "[\\x00\\n\\r\\x1a'\"\\\\a-z]{0,32}") {
        let sql = db().substitute("?s", &args![s.clone()]).unwrap();
        let body = &sql[1..sql.len() - 1];
        prop_assert!(!body.contains('\0'));
        prop_assert!(!body.contains('\n'));
        prop_assert_eq!(unescape(body), s);
    }

    #[test]
    fn arguments_are_consumed_in_order(nums in prop::collection::vec(any::<i64>(), 0..20)) {
        let template = vec!["?i"; nums.len()].join(",");
        let args: Vec<Value> = nums.iter().copied().map(Value::from).collect();
        let sql = db().substitute(&template, &args).unwrap();
        let expected = nums.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
        prop_assert_eq!(sql, expected);
    }

    #[test]
    fn text_without_markers_is_unchanged(text in "[^?]{0,64}") {
        prop_assert_eq!(db().substitute(&text, &[]).unwrap(), text);
    }

    #[test]
    fn identifiers_are_wrapped_and_doubled(name in "[A-Za-z_`]{1,24}") {
        let sql = db().substitute("?n", &args![name.clone()]).unwrap();
        prop_assert_eq!(sql, format!("`{}`", name.replace('`', "``")));
    }

    #[test]
    fn floats_have_exact_decimals(f in -1.0e9f64..1.0e9, precision in 0u32..8) {
        let sql = db()
            .substitute(&format!("?{precision}f"), &args![f])
            .unwrap();
        let decimals = sql.split_once('.').map_or(0, |(_, frac)| frac.len());
        prop_assert_eq!(decimals, precision as usize);
    }
}
