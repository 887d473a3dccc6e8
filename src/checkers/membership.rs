//! Membership checkers: `in` (exact match), `include` (substring match).
//!
//! Both take a `(a/b/c)` set argument. `in` compares the string-formatted
//! rendering of any scalar for exact membership; `include` requires a
//! string field and passes when it contains at least one listed substring.

use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::{self, Token};
use crate::value::{kind_of, render, Kind};

fn parse_members(report: &mut Report, token: &Token, path: &str) -> Option<Vec<String>> {
    match parser::parse_set(&token.arg) {
        Ok(members) => Some(members),
        Err(why) => {
            let raw = format!("{}={}", token.name, token.arg);
            report.push(Violation::grammar(path, &raw, why));
            None
        }
    }
}

/// `in=(a/b/c)` — the stringified scalar must equal one member.
pub(crate) fn within(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let Some(members) = parse_members(report, token, path) else { return };
    if matches!(kind_of(value), Kind::Seq | Kind::Map) {
        report.push(
            Violation::type_mismatch(path, render(value), "a scalar value")
                .with_message_opt(token.message()),
        );
        return;
    }
    let rendered = render(value);
    if !members.iter().any(|m| *m == rendered) {
        report.push(
            Violation::constraint(path, rendered, format!("it is not in {}", token.arg))
                .with_message_opt(token.message()),
        );
    }
}

/// `include=(a/b/c)` — the string must contain at least one member.
pub(crate) fn include(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let Some(members) = parse_members(report, token, path) else { return };
    let Value::String(s) = value else {
        report.push(
            Violation::type_mismatch(path, render(value), "a string")
                .with_message_opt(token.message()),
        );
        return;
    };
    if !members.iter().any(|m| s.contains(m.as_str())) {
        report.push(
            Violation::constraint(path, s.clone(), format!("it does not include any of {}", token.arg))
                .with_message_opt(token.message()),
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
