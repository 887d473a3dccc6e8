//! `json` — the string must parse as a JSON document.

use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::Token;
use crate::value::render;

/// `json` — string-only; any JSON document (object, array, or bare scalar
/// literal) passes.
pub(crate) fn json(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let Value::String(s) = value else {
        report.push(
            Violation::type_mismatch(path, render(value), "a string")
                .with_message_opt(token.message()),
        );
        return;
    };
    if serde_json::from_str::<Value>(s).is_err() {
        report.push(
            Violation::constraint(path, s.clone(), "it is not valid JSON")
                .with_message_opt(token.message()),
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
