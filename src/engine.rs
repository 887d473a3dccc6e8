//! The traversal engine.
//!
//! A validation call serializes the input into the dynamic value model,
//! resolves the root type's descriptor, and walks the two in lockstep:
//! descriptors say which fields exist and which rules they carry, the value
//! tree says what the caller actually passed. Checkers append to the pooled
//! context's report; cross-field tokens only collect participants, and the
//! groups are judged once after the walk in [`Context::finish`].
//!
//! Grammar errors and unknown checker names are field-scoped violations:
//! they land in the report and the walk continues. Only an unusable root
//! aborts the call.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::context::{self, Context};
use crate::describe::{spec_of, Describe, NestedKind, TypeSpec};
use crate::error::{InputError, ValidError, Violation};
use crate::groups::{self, GroupKind};
use crate::parser;
use crate::registry::Snapshot;
use crate::rules::RuleMap;
use crate::value::{is_zero, kind_of, render};

/// Path used when validating a bare scalar.
const SCALAR_PATH: &str = "value";

/// One validation call's immutable configuration.
pub(crate) struct Walk<'a> {
    pub snapshot: Snapshot,
    pub overrides: Option<&'a RuleMap>,
    pub tag: &'a str,
}

fn to_dynamic<T: Serialize>(input: &T) -> Result<Value, InputError> {
    serde_json::to_value(input).map_err(|e| InputError::Serialize(e.to_string()))
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Validates a single described record.
pub(crate) fn validate_one<T: Describe + Serialize>(
    input: &T,
    walk: &Walk<'_>,
) -> Result<(), ValidError> {
    let dynamic = to_dynamic(input)?;
    run_dynamic::<T>(&dynamic, walk)
}

/// Validates a slice of described records; element paths carry a `[index]`
/// suffix on the type name.
pub(crate) fn validate_many<T: Describe + Serialize>(
    inputs: &[T],
    walk: &Walk<'_>,
) -> Result<(), ValidError> {
    let dynamic = to_dynamic(&inputs)?;
    run_dynamic::<T>(&dynamic, walk)
}

fn run_dynamic<T: Describe>(dynamic: &Value, walk: &Walk<'_>) -> Result<(), ValidError> {
    let spec = spec_of::<T>(walk.tag);
    trace!(root = spec.type_name, tag = walk.tag, "starting validation walk");
    let mut ctx = context::acquire();
    match dynamic {
        Value::Null => return Err(InputError::NilRoot.into()),
        Value::Object(map) => walk.record(&mut ctx, &spec, spec.type_name, map),
        Value::Array(elems) => {
            for (i, elem) in elems.iter().enumerate() {
                let Value::Object(map) = elem else {
                    return Err(InputError::UnsupportedElement(kind_of(elem).name()).into());
                };
                let path = format!("{}[{i}]", spec.type_name);
                walk.record(&mut ctx, &spec, &path, map);
            }
        }
        other => return Err(InputError::NotComposite(kind_of(other).name()).into()),
    }
    ctx.finish()
}

/// Validates a bare scalar against rule strings joined into one rule.
pub(crate) fn validate_scalar<T: Serialize>(
    input: &T,
    rules: &[&str],
    walk: &Walk<'_>,
) -> Result<(), ValidError> {
    let dynamic = to_dynamic(input)?;
    let rule = rules.join(",");
    let mut ctx = context::acquire();
    walk.apply_rule(&mut ctx, &rule, SCALAR_PATH, SCALAR_PATH, &dynamic);
    ctx.finish()
}

/// Validates query-string pairs against a rule map. A field named in the
/// rules but absent from the query validates as the empty string, so
/// `required` still fires for it.
pub(crate) fn validate_pairs(
    pairs: &indexmap::IndexMap<String, String>,
    rules: &RuleMap,
    walk: &Walk<'_>,
) -> Result<(), ValidError> {
    let mut ctx = context::acquire();
    for (field, rule) in rules.iter() {
        let text = pairs.get(field).map(String::as_str).unwrap_or("");
        let value = Value::String(text.to_string());
        walk.apply_rule(&mut ctx, rule, field, field, &value);
    }
    ctx.finish()
}

// ============================================================================
// WALK
// ============================================================================

impl Walk<'_> {
    /// Walks one record level: applies each field's effective rule, then
    /// recurses through descriptor hooks.
    fn record(&self, ctx: &mut Context, spec: &TypeSpec, path: &str, map: &Map<String, Value>) {
        let null = Value::Null;
        for field in &spec.fields {
            if !field.exported {
                continue;
            }
            // Absent keys validate as null, so `required` and `exist` see
            // a missing field the same way they see a nil pointer.
            let value = map.get(field.name).unwrap_or(&null);
            let field_path = format!("{path}.{}", field.name);
            let rule = match self.overrides.and_then(|o| o.get(field.name)) {
                Some(overridden) => overridden,
                None => field.rule,
            };
            if !rule.is_empty() {
                self.apply_rule(ctx, rule, &field_path, field.name, value);
            }

            if field.opaque {
                continue;
            }
            let Some((kind, hook)) = field.nested else { continue };
            match (kind, value) {
                (NestedKind::Record, Value::Object(child)) => {
                    let child_spec = hook(self.tag);
                    self.record(ctx, &child_spec, &field_path, child);
                }
                (NestedKind::Elements, Value::Array(elems)) => {
                    let child_spec = hook(self.tag);
                    for (i, elem) in elems.iter().enumerate() {
                        if let Value::Object(child) = elem {
                            let elem_path = format!("{field_path}[{i}]");
                            self.record(ctx, &child_spec, &elem_path, child);
                        }
                    }
                }
                (NestedKind::Elements, Value::Object(entries)) => {
                    let child_spec = hook(self.tag);
                    for (key, elem) in entries {
                        if let Value::Object(child) = elem {
                            let elem_path = format!("{field_path}[{key}]");
                            self.record(ctx, &child_spec, &elem_path, child);
                        }
                    }
                }
                // A nil or shape-mismatched composite has nothing to descend
                // into; its own rule already ran against the value as-is.
                _ => {}
            }
        }
    }

    /// Applies one combined rule string to one value.
    pub(crate) fn apply_rule(
        &self,
        ctx: &mut Context,
        rule: &str,
        path: &str,
        field: &str,
        value: &Value,
    ) {
        let raw_tokens = match parser::split_rules(rule) {
            Ok(tokens) => tokens,
            Err(why) => {
                ctx.report.push(Violation::grammar(path, rule, why));
                return;
            }
        };

        let mut required_failed = false;
        for raw in &raw_tokens {
            let token = parser::parse_token(raw);
            // A zero value that already failed `required` would fail every
            // later constraint too; the field gets exactly one entry.
            // Cross-field tokens still collect, since their verdict belongs
            // to the whole group, not this field.
            if required_failed && !matches!(token.name.as_str(), "either" | "bothEq") {
                continue;
            }
            match token.name.as_str() {
                "required" => {
                    if is_zero(value) {
                        ctx.report.push(
                            Violation::constraint(path, render(value), "it is required")
                                .with_message_opt(token.message()),
                        );
                        required_failed = true;
                    }
                }
                "exist" => {
                    if value.is_null() {
                        ctx.report.push(
                            Violation::constraint(path, render(value), "it must exist")
                                .with_message_opt(token.message()),
                        );
                    }
                }
                "either" | "bothEq" => {
                    let kind = if token.name == "either" {
                        GroupKind::Either
                    } else {
                        GroupKind::BothEq
                    };
                    if token.arg.is_empty() {
                        ctx.report.push(Violation::grammar(
                            path,
                            raw,
                            "cross-field token needs a group name",
                        ));
                    } else {
                        groups::collect(
                            &mut ctx.groups,
                            kind,
                            &token.arg,
                            path,
                            token.message(),
                            value,
                        );
                    }
                }
                name => match self.snapshot.resolve(name) {
                    Some(resolved) => resolved.call(&mut ctx.report, &token, path, field, value),
                    None => ctx.report.push(Violation::unknown_checker(path, name)),
                },
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
