//! Kind classification and measurement over the dynamic value model.
//!
//! The traversal engine walks `serde_json::Value` trees obtained by
//! serializing the caller's input, so every checker needs a uniform way to
//! ask "what kind is this", "is it zero", and "how big is it". Range-family
//! checkers measure strings in runes (scalar values), never bytes.

use serde_json::Value;

// ============================================================================
// KIND
// ============================================================================

/// Runtime kind of a dynamic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null` — a nil pointer or absent field.
    Null,
    /// Boolean.
    Bool,
    /// Signed integer magnitude.
    Int,
    /// Unsigned integer magnitude.
    Uint,
    /// Floating-point magnitude.
    Float,
    /// String; measured by rune count.
    Str,
    /// Sequence (slice / array); measured by element count.
    Seq,
    /// Map or record; measured by entry count.
    Map,
}

impl Kind {
    /// Lower-case kind name for error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::Seq => "sequence",
            Kind::Map => "map",
        }
    }
}

/// Classifies a dynamic value.
#[must_use]
pub fn kind_of(value: &Value) -> Kind {
    match value {
        Value::Null => Kind::Null,
        Value::Bool(_) => Kind::Bool,
        Value::Number(n) => {
            if n.is_u64() {
                Kind::Uint
            } else if n.is_i64() {
                Kind::Int
            } else {
                Kind::Float
            }
        }
        Value::String(_) => Kind::Str,
        Value::Array(_) => Kind::Seq,
        Value::Object(_) => Kind::Map,
    }
}

// ============================================================================
// ZERO TEST
// ============================================================================

/// True for the zero value of each kind: `null`, `false`, `0`, `0.0`, `""`,
/// and empty collections.
#[must_use]
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// ============================================================================
// MEASUREMENT
// ============================================================================

/// Measures a value for the range/size family: rune count for strings,
/// numeric magnitude for numbers, element count for collections.
///
/// Returns `None` for kinds that have no size (`null`, `bool`).
#[must_use]
pub fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Number(n) => n.as_f64(),
        Value::Array(a) => Some(a.len() as f64),
        Value::Object(o) => Some(o.len() as f64),
        Value::Null | Value::Bool(_) => None,
    }
}

/// Unit suffix for generated explanations, chosen by kind: strings count
/// characters, collections count elements, numbers are bare magnitudes.
#[must_use]
pub fn unit_suffix(value: &Value) -> &'static str {
    match kind_of(value) {
        Kind::Str => " characters",
        Kind::Seq | Kind::Map => " elements",
        _ => "",
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Renders a value for the `input "<value>"` part of a violation entry.
///
/// Strings render without quotes, scalars via their display form, and
/// composites as compact JSON.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => "<nil>".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        composite => serde_json::to_string(composite).unwrap_or_else(|_| composite.to_string()),
    }
}

/// Formats a bound for explanations without a trailing `.0` on whole numbers.
#[must_use]
pub fn fmt_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < 1e15 {
        format!("{}", bound as i64)
    } else {
        format!("{bound}")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_are_classified() {
        assert_eq!(kind_of(&json!(null)), Kind::Null);
        assert_eq!(kind_of(&json!(true)), Kind::Bool);
        assert_eq!(kind_of(&json!(3)), Kind::Uint);
        assert_eq!(kind_of(&json!(-3)), Kind::Int);
        assert_eq!(kind_of(&json!(1.5)), Kind::Float);
        assert_eq!(kind_of(&json!("x")), Kind::Str);
        assert_eq!(kind_of(&json!([1])), Kind::Seq);
        assert_eq!(kind_of(&json!({"a": 1})), Kind::Map);
    }

    #[test]
    fn zero_values() {
        for zero in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})]
        {
            assert!(is_zero(&zero), "{zero} should be zero");
        }
        for non_zero in [json!(true), json!(1), json!(-0.5), json!("a"), json!([0]), json!({"a": 0})]
        {
            assert!(!is_zero(&non_zero), "{non_zero} should not be zero");
        }
    }

    #[test]
    fn strings_measure_in_runes_not_bytes() {
        // Three runes, nine encoded bytes.
        let value = json!("\u{4f60}\u{597d}\u{5417}");
        assert_eq!(measure(&value), Some(3.0));
    }

    #[test]
    fn numbers_measure_by_magnitude() {
        assert_eq!(measure(&json!(42)), Some(42.0));
        assert_eq!(measure(&json!(-7)), Some(-7.0));
        assert_eq!(measure(&json!(2.5)), Some(2.5));
    }

    #[test]
    fn collections_measure_by_len() {
        assert_eq!(measure(&json!([1, 2, 3])), Some(3.0));
        assert_eq!(measure(&json!({"a": 1, "b": 2})), Some(2.0));
    }

    #[test]
    fn unsizable_kinds_measure_none() {
        assert_eq!(measure(&json!(null)), None);
        assert_eq!(measure(&json!(true)), None);
    }

    #[test]
    fn rendering() {
        assert_eq!(render(&json!("abc")), "abc");
        assert_eq!(render(&json!(12)), "12");
        assert_eq!(render(&json!(null)), "<nil>");
        assert_eq!(render(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn bound_formatting_drops_trailing_zero() {
        assert_eq!(fmt_bound(5.0), "5");
        assert_eq!(fmt_bound(1.5), "1.5");
    }
}
