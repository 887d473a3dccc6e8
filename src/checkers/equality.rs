//! Equality-family checkers: `eq`, `noeq`.
//!
//! Both compare the measured size/magnitude (same measurement as the range
//! family) against a single integer argument. Unlike the range family, a
//! zero argument is meaningful here: `eq=0` demands an empty string or
//! collection.

use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::{self, Token};
use crate::value::{fmt_bound, measure, render, unit_suffix};

fn prepared(report: &mut Report, token: &Token, path: &str, value: &Value) -> Option<(f64, f64)> {
    let bound = match parser::parse_bound(&token.arg) {
        Ok(b) => b,
        Err(why) => {
            let raw = format!("{}={}", token.name, token.arg);
            report.push(Violation::grammar(path, &raw, why));
            return None;
        }
    };
    match measure(value) {
        Some(m) => Some((m, bound)),
        None => {
            report.push(
                Violation::type_mismatch(path, render(value), "a sizable value")
                    .with_message_opt(token.message()),
            );
            None
        }
    }
}

/// `eq=N` — measured size/magnitude must equal `N`.
pub(crate) fn eq(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let Some((m, bound)) = prepared(report, token, path, value) else { return };
    if m != bound {
        report.push(
            Violation::constraint(
                path,
                render(value),
                format!("it is not equal to {}{}", fmt_bound(bound), unit_suffix(value)),
            )
            .with_message_opt(token.message()),
        );
    }
}

/// `noeq=N` — measured size/magnitude must not equal `N`.
pub(crate) fn noeq(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let Some((m, bound)) = prepared(report, token, path, value) else { return };
    if m == bound {
        report.push(
            Violation::constraint(
                path,
                render(value),
                format!("it should not be equal to {}{}", fmt_bound(bound), unit_suffix(value)),
            )
            .with_message_opt(token.message()),
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
