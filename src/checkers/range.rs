//! Range-family checkers: `to`, `oto`, `ge`, `le`, `gt`, `lt`.
//!
//! All of them measure the value uniformly (rune count for strings, numeric
//! magnitude, element count for collections) and compare against bounds
//! parsed from the token argument. `to`/`ge`/`le` use closed bounds,
//! `oto`/`gt`/`lt` open ones. A bound of zero is treated as unset and is not
//! enforced, so `to=0~5` only checks the upper side.

use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::{self, Token};
use crate::value::{fmt_bound, measure, render, unit_suffix};

/// Measures the value, reporting a type mismatch for unsizable kinds.
fn measured(report: &mut Report, token: &Token, path: &str, value: &Value) -> Option<f64> {
    match measure(value) {
        Some(m) => Some(m),
        None => {
            report.push(
                Violation::type_mismatch(path, render(value), "a sizable value")
                    .with_message_opt(token.message()),
            );
            None
        }
    }
}

fn grammar(report: &mut Report, token: &Token, path: &str, why: impl std::fmt::Display) {
    let raw = format!("{}={}", token.name, token.arg);
    report.push(Violation::grammar(path, &raw, why));
}

fn fail(report: &mut Report, token: &Token, path: &str, value: &Value, explain: String) {
    report.push(Violation::constraint(path, render(value), explain).with_message_opt(token.message()));
}

/// `to=min~max` — closed interval; values exactly at a bound pass.
pub(crate) fn to(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let (min, max) = match parser::parse_range(&token.arg) {
        Ok(bounds) => bounds,
        Err(why) => return grammar(report, token, path, why),
    };
    let Some(m) = measured(report, token, path, value) else { return };
    let unit = unit_suffix(value);
    if min != 0.0 && m < min {
        fail(report, token, path, value, format!("it is less than {}{unit}", fmt_bound(min)));
    }
    if max != 0.0 && m > max {
        fail(report, token, path, value, format!("it is greater than {}{unit}", fmt_bound(max)));
    }
}

/// `oto=min~max` — open interval; values exactly at a bound fail.
pub(crate) fn oto(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let (min, max) = match parser::parse_range(&token.arg) {
        Ok(bounds) => bounds,
        Err(why) => return grammar(report, token, path, why),
    };
    let Some(m) = measured(report, token, path, value) else { return };
    let unit = unit_suffix(value);
    if min != 0.0 && m <= min {
        fail(
            report,
            token,
            path,
            value,
            format!("it is less than or equal to {}{unit}", fmt_bound(min)),
        );
    }
    if max != 0.0 && m >= max {
        fail(
            report,
            token,
            path,
            value,
            format!("it is greater than or equal to {}{unit}", fmt_bound(max)),
        );
    }
}

fn single_bound(
    report: &mut Report,
    token: &Token,
    path: &str,
    value: &Value,
    check: impl FnOnce(f64, f64) -> Option<String>,
) {
    let bound = match parser::parse_bound(&token.arg) {
        Ok(b) => b,
        Err(why) => return grammar(report, token, path, why),
    };
    if bound == 0.0 {
        // Zero bound is unset.
        return;
    }
    let Some(m) = measured(report, token, path, value) else { return };
    if let Some(explain) = check(m, bound) {
        fail(report, token, path, value, explain);
    }
}

/// `ge=N` — measured value must be at least `N` (closed).
pub(crate) fn ge(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let unit = unit_suffix(value);
    single_bound(report, token, path, value, |m, b| {
        (m < b).then(|| format!("it is less than {}{unit}", fmt_bound(b)))
    });
}

/// `gt=N` — measured value must exceed `N` (open).
pub(crate) fn gt(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let unit = unit_suffix(value);
    single_bound(report, token, path, value, |m, b| {
        (m <= b).then(|| format!("it is less than or equal to {}{unit}", fmt_bound(b)))
    });
}

/// `le=N` — measured value must be at most `N` (closed).
pub(crate) fn le(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let unit = unit_suffix(value);
    single_bound(report, token, path, value, |m, b| {
        (m > b).then(|| format!("it is greater than {}{unit}", fmt_bound(b)))
    });
}

/// `lt=N` — measured value must be below `N` (open).
pub(crate) fn lt(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let unit = unit_suffix(value);
    single_bound(report, token, path, value, |m, b| {
        (m >= b).then(|| format!("it is greater than or equal to {}{unit}", fmt_bound(b)))
    });
}

// ============================================================================
// TESTS
// ============================================================================
