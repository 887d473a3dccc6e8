//! Public validation entry points.
//!
//! Each function configures a [`Walk`] — a registry snapshot plus optional
//! rule overrides and the tag namespace — and hands off to the traversal
//! engine. The snapshot is taken once per call, so a custom checker
//! registered mid-walk never changes behavior within that walk.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::describe::Describe;
use crate::engine::{self, Walk};
use crate::error::{Report, ValidError};
use crate::parser::Token;
use crate::registry::{CheckerFn, Snapshot};
use crate::rules::RuleMap;

/// Tag namespace used when the caller does not name one.
pub const DEFAULT_TAG: &str = "valid";

// ============================================================================
// SCALAR
// ============================================================================

/// Validates a single value against explicit rule strings.
///
/// The rules are joined into one combined rule; violations use the fixed
/// path `value`.
///
/// ```
/// use rulecheck::validate_value;
///
/// assert!(validate_value(&"hello", &["required", "to=1~10"]).is_ok());
/// assert!(validate_value(&"", &["required"]).is_err());
/// ```
///
/// # Errors
///
/// [`ValidError::Invalid`] when any rule is violated;
/// [`ValidError::Input`] when the value cannot be serialized.
pub fn validate_value<T: Serialize>(value: &T, rules: &[&str]) -> Result<(), ValidError> {
    let walk = Walk {
        snapshot: Snapshot::take(),
        overrides: None,
        tag: DEFAULT_TAG,
    };
    engine::validate_scalar(value, rules, &walk)
}

// ============================================================================
// RECORDS
// ============================================================================

/// Validates a record against its embedded rules under the default tag.
///
/// # Errors
///
/// [`ValidError::Invalid`] with the full `"; "`-joined report when any
/// constraint is violated; [`ValidError::Input`] when the root is nil,
/// non-composite, or unserializable.
pub fn validate_struct<T: Describe + Serialize>(input: &T) -> Result<(), ValidError> {
    validate_struct_tagged(input, DEFAULT_TAG)
}

/// [`validate_struct`] under an explicit tag namespace.
///
/// # Errors
///
/// Same contract as [`validate_struct`].
pub fn validate_struct_tagged<T: Describe + Serialize>(
    input: &T,
    tag: &str,
) -> Result<(), ValidError> {
    let walk = Walk {
        snapshot: Snapshot::take(),
        overrides: None,
        tag,
    };
    engine::validate_one(input, &walk)
}

/// Validates every element of a slice; violation paths read `Type[i].Field`.
///
/// An empty slice is trivially valid.
///
/// # Errors
///
/// Same contract as [`validate_struct`]; additionally
/// [`ValidError::Input`] when an element is not a record.
pub fn validate_structs<T: Describe + Serialize>(inputs: &[T]) -> Result<(), ValidError> {
    let walk = Walk {
        snapshot: Snapshot::take(),
        overrides: None,
        tag: DEFAULT_TAG,
    };
    engine::validate_many(inputs, &walk)
}

/// Validates a record with per-field rule overrides.
///
/// A field named in `rules` (case-insensitively) uses the supplied rule
/// instead of its embedded one; other fields keep their embedded rules.
///
/// # Errors
///
/// Same contract as [`validate_struct`].
pub fn validate_struct_with_rules<T: Describe + Serialize>(
    rules: &RuleMap,
    input: &T,
) -> Result<(), ValidError> {
    validate_struct_with_rules_tagged(rules, input, DEFAULT_TAG)
}

/// [`validate_struct_with_rules`] under an explicit tag namespace: fields
/// not named in the overrides keep their embedded rules for that tag.
///
/// # Errors
///
/// Same contract as [`validate_struct`].
pub fn validate_struct_with_rules_tagged<T: Describe + Serialize>(
    rules: &RuleMap,
    input: &T,
    tag: &str,
) -> Result<(), ValidError> {
    let walk = Walk {
        snapshot: Snapshot::take(),
        overrides: Some(rules),
        tag,
    };
    engine::validate_one(input, &walk)
}

/// Validates a record with a checker visible only to this call.
///
/// The scoped checker shadows any registered or built-in checker of the
/// same name for the duration of the walk.
///
/// # Errors
///
/// Same contract as [`validate_struct`].
pub fn validate_struct_with_custom_fn<T: Describe + Serialize>(
    input: &T,
    name: &str,
    checker: impl Fn(&mut Report, &Token, &str, &str, &Value) + Send + Sync + 'static,
) -> Result<(), ValidError> {
    validate_struct_with_custom_fn_tagged(input, name, checker, DEFAULT_TAG)
}

/// [`validate_struct_with_custom_fn`] under an explicit tag namespace.
///
/// # Errors
///
/// Same contract as [`validate_struct`].
pub fn validate_struct_with_custom_fn_tagged<T: Describe + Serialize>(
    input: &T,
    name: &str,
    checker: impl Fn(&mut Report, &Token, &str, &str, &Value) + Send + Sync + 'static,
    tag: &str,
) -> Result<(), ValidError> {
    let scoped: CheckerFn = Arc::new(checker);
    let walk = Walk {
        snapshot: Snapshot::take().with_scoped(name, scoped),
        overrides: None,
        tag,
    };
    engine::validate_one(input, &walk)
}

// ============================================================================
// URL / QUERY STRING
// ============================================================================

/// Validates query-string parameters against a rule map.
///
/// Accepts either a full URL (everything after the first `?` is the query)
/// or a bare query string. Values are percent-decoded; for a repeated key
/// the last value wins. A field named in the rules but absent from the
/// query validates as the empty string, so `required` fires for it.
///
/// Query values are never coerced: every value checks as a string, so the
/// size family measures rune count (`to=1~3` on `age` bounds the digit
/// count). Use `int`/`float` for numeric-shape checks.
///
/// ```
/// use rulecheck::{validate_url, RuleMap};
///
/// let rules: RuleMap = [("name", "required"), ("age", "int")].into_iter().collect();
/// assert!(validate_url("https://example.com/u?name=bob&age=44", &rules).is_ok());
/// assert!(validate_url("age=44", &rules).is_err()); // name missing
/// ```
///
/// # Errors
///
/// [`ValidError::Invalid`] when any rule is violated.
pub fn validate_url(input: &str, rules: &RuleMap) -> Result<(), ValidError> {
    let query = match input.split_once('?') {
        Some((_, q)) => q,
        None => input,
    };
    let mut pairs = indexmap::IndexMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        pairs.insert(key.to_lowercase(), value.into_owned());
    }
    let walk = Walk {
        snapshot: Snapshot::take(),
        overrides: None,
        tag: DEFAULT_TAG,
    };
    engine::validate_pairs(&pairs, rules, &walk)
}

// ============================================================================
// TESTS
// ============================================================================
