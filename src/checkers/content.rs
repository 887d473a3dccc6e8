//! Content checkers: `prefix`, `suffix`.
//!
//! Both are string-only and take a plain string argument, compared byte-wise
//! against the start or end of the value.

use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::Token;
use crate::value::render;

fn str_input<'v>(
    report: &mut Report,
    token: &Token,
    path: &str,
    value: &'v Value,
) -> Option<&'v str> {
    match value {
        Value::String(s) => Some(s),
        other => {
            report.push(
                Violation::type_mismatch(path, render(other), "a string")
                    .with_message_opt(token.message()),
            );
            None
        }
    }
}

fn needle<'t>(report: &mut Report, token: &'t Token, path: &str) -> Option<&'t str> {
    if token.arg.is_empty() {
        let raw = format!("{}=", token.name);
        report.push(Violation::grammar(path, &raw, "it needs a non-empty argument"));
        return None;
    }
    Some(&token.arg)
}

/// `prefix=abc` — the string must start with the argument.
pub(crate) fn prefix(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let Some(needle) = needle(report, token, path) else { return };
    let Some(s) = str_input(report, token, path, value) else { return };
    if !s.starts_with(needle) {
        report.push(
            Violation::constraint(path, s.to_string(), format!("it does not start with '{needle}'"))
                .with_message_opt(token.message()),
        );
    }
}

/// `suffix=xyz` — the string must end with the argument.
pub(crate) fn suffix(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let Some(needle) = needle(report, token, path) else { return };
    let Some(s) = str_input(report, token, path, value) else { return };
    if !s.ends_with(needle) {
        report.push(
            Violation::constraint(path, s.to_string(), format!("it does not end with '{needle}'"))
                .with_message_opt(token.message()),
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(f: crate::checkers::BuiltinFn, arg: &str, value: Value) -> Vec<String> {
        let mut report = Report::new();
        let token = Token::new("x", arg);
        f(&mut report, &token, "T.F", "F", &value);
        report.iter().map(str::to_string).collect()
    }

    #[test]
    fn prefix_matches_the_start() {
        assert!(run(prefix, "abc", json!("abcxyz")).is_empty());
        let entries = run(prefix, "abc", json!("xyzabc"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("does not start with 'abc'"));
    }

    #[test]
    fn suffix_matches_the_end() {
        assert!(run(suffix, "xyz", json!("abcxyz")).is_empty());
        let entries = run(suffix, "xyz", json!("xyzabc"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("does not end with 'xyz'"));
    }

    #[test]
    fn whole_string_is_its_own_prefix_and_suffix() {
        assert!(run(prefix, "abc", json!("abc")).is_empty());
        assert!(run(suffix, "abc", json!("abc")).is_empty());
    }

    #[test]
    fn empty_argument_is_a_grammar_violation() {
        let entries = run(prefix, "", json!("abc"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("invalid rule"));
    }

    #[test]
    fn non_string_input_is_a_type_mismatch() {
        let entries = run(suffix, "xyz", json!(42));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("not a string"));
    }
}
