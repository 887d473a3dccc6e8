//! `unique` — no duplicate stringified elements.
//!
//! Strings split by `,`; sequences compare their elements' stringified
//! renderings. The first duplicate found is the one named in the violation.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::Token;
use crate::value::render;

fn first_duplicate<I: Iterator<Item = String>>(items: I) -> Option<String> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.clone()) {
            return Some(item);
        }
    }
    None
}

/// `unique` — elements must have no duplicate stringified value.
pub(crate) fn unique(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let duplicate = match value {
        Value::String(s) => first_duplicate(s.split(',').map(|p| p.trim().to_string())),
        Value::Array(elems) => first_duplicate(elems.iter().map(render)),
        other => {
            report.push(
                Violation::type_mismatch(path, render(other), "a string or sequence")
                    .with_message_opt(token.message()),
            );
            return;
        }
    };

    if let Some(dup) = duplicate {
        report.push(
            Violation::constraint(path, render(value), format!("it has duplicate element '{dup}'"))
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

    fn run(arg: &str, value: Value) -> Vec<String> {
        let mut report = Report::new();
        let token = Token::new("unique", arg);
        unique(&mut report, &token, "T.F", "F", &value);
        report.iter().map(str::to_string).collect()
    }

    #[test]
    fn distinct_string_elements_pass() {
        assert!(run("", json!("a,b,c")).is_empty());
    }

    #[test]
    fn duplicate_string_elements_fail() {
        let entries = run("", json!("a,b,a"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("duplicate element 'a'"));
    }

    #[test]
    fn sequence_elements_compare_stringified() {
        assert!(run("", json!([1, 2, 3])).is_empty());
        assert!(!run("", json!([1, 2, 1])).is_empty());
        // "1" and 1 stringify identically, so they collide.
        assert!(!run("", json!(["1", 1])).is_empty());
    }

    #[test]
    fn non_collection_is_a_type_mismatch() {
        let entries = run("", json!(42));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("not a string or sequence"));
    }
}
