//! Numeric-shape checkers: `int`, `float`, `ints`.
//!
//! These apply to both string-encoded and native numeric kinds. `ints`
//! additionally validates every element of a string split by a separator
//! (default `,`) or every element of a sequence.

use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::Token;
use crate::value::{kind_of, render, Kind};

fn is_int_text(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && (s.parse::<i64>().is_ok() || s.parse::<u64>().is_ok())
}

fn is_int_value(value: &Value) -> bool {
    match value {
        Value::Number(_) => matches!(kind_of(value), Kind::Int | Kind::Uint),
        Value::String(s) => is_int_text(s),
        _ => false,
    }
}

/// `int` — a native integer or a string encoding one.
pub(crate) fn int(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    if !is_int_value(value) {
        report.push(
            Violation::constraint(path, render(value), "it is not an integer")
                .with_message_opt(token.message()),
        );
    }
}

/// `float` — a native number or a string encoding one. Integers are valid
/// floats.
pub(crate) fn float(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let ok = match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty() && s.parse::<f64>().is_ok()
        }
        _ => false,
    };
    if !ok {
        report.push(
            Violation::constraint(path, render(value), "it is not a float")
                .with_message_opt(token.message()),
        );
    }
}

/// `ints[=sep]` — every element of the separated string (default separator
/// `,`) or of the sequence must be an integer.
pub(crate) fn ints(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let ok = match value {
        Value::String(s) => {
            let sep = token.arg_or(",");
            !s.is_empty() && s.split(sep).all(is_int_text)
        }
        Value::Array(elems) => !elems.is_empty() && elems.iter().all(is_int_value),
        Value::Number(_) => is_int_value(value),
        _ => false,
    };
    if !ok {
        report.push(
            Violation::constraint(path, render(value), "it is not a list of integers")
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
    fn int_accepts_native_and_string_encoded() {
        assert!(run(int, "", json!(42)).is_empty());
        assert!(run(int, "", json!(-7)).is_empty());
        assert!(run(int, "", json!("123")).is_empty());
        assert!(run(int, "", json!("-123")).is_empty());
    }

    #[test]
    fn int_rejects_floats_and_garbage() {
        assert!(!run(int, "", json!(1.5)).is_empty());
        assert!(!run(int, "", json!("1.5")).is_empty());
        assert!(!run(int, "", json!("abc")).is_empty());
        assert!(!run(int, "", json!(true)).is_empty());
    }

    #[test]
    fn float_accepts_all_numeric_shapes() {
        assert!(run(float, "", json!(1.5)).is_empty());
        assert!(run(float, "", json!(3)).is_empty());
        assert!(run(float, "", json!("2.5")).is_empty());
        assert!(run(float, "", json!("-2")).is_empty());
        assert!(!run(float, "", json!("two")).is_empty());
    }

    #[test]
    fn ints_splits_strings_by_default_comma() {
        assert!(run(ints, "", json!("1,2,3")).is_empty());
        assert!(!run(ints, "", json!("1,two,3")).is_empty());
    }

    #[test]
    fn ints_honors_custom_separator() {
        assert!(run(ints, ";", json!("1;2;3")).is_empty());
        assert!(!run(ints, ";", json!("1,2,3")).is_empty());
    }

    #[test]
    fn ints_validates_sequence_elements() {
        assert!(run(ints, "", json!([1, 2, 3])).is_empty());
        assert!(run(ints, "", json!(["1", 2])).is_empty());
        assert!(!run(ints, "", json!([1, "two"])).is_empty());
    }

    #[test]
    fn ints_rejects_empty_input() {
        assert!(!run(ints, "", json!("")).is_empty());
        assert!(!run(ints, "", json!([])).is_empty());
    }
}
