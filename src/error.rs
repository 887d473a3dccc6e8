//! Violation records, the aggregate report, and the public error taxonomy.
//!
//! Checkers never return errors. They append [`Violation`]s to a shared
//! [`Report`]; after the walk the report renders to a single `"; "`-joined
//! string. Only malformed input at the root ([`InputError`]) aborts a
//! validation call early.
//!
//! All static message fragments use `Cow<'static, str>` so the common case
//! of a fixed explanation allocates nothing.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexSet;

// ============================================================================
// VIOLATION
// ============================================================================

/// What class of problem a violation describes.
///
/// The distinction exists for internal bookkeeping and tests; the rendered
/// report intentionally does not expose it (all violations read the same way
/// to callers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A malformed rule token (unterminated regex quote, bad range syntax).
    Grammar,
    /// A rule token named a checker that is not registered anywhere.
    UnknownChecker,
    /// A string-only checker was applied to a non-string field.
    TypeMismatch,
    /// The normal case: a value failed a semantic check.
    Constraint,
}

/// A single violated constraint, bound to a field path.
///
/// Renders as `"<path>" input "<value>", explain: <text>` unless a custom
/// message was attached, in which case the custom message fully replaces
/// the generated text.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Problem class.
    pub kind: ViolationKind,
    /// Hierarchical field path, e.g. `User.Passport.Number` or `Tags[2]`.
    pub path: String,
    /// Rendering of the offending input value.
    pub input: String,
    /// Generated explanation, e.g. `it is less than 5 characters`.
    pub explain: Cow<'static, str>,
    /// Caller-supplied message that replaces the generated text entirely.
    pub message: Option<String>,
}

impl Violation {
    /// Creates a constraint violation.
    pub fn constraint(
        path: impl Into<String>,
        input: impl Into<String>,
        explain: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind: ViolationKind::Constraint,
            path: path.into(),
            input: input.into(),
            explain: explain.into(),
            message: None,
        }
    }

    /// Creates a grammar violation for a malformed rule token.
    pub fn grammar(path: impl Into<String>, raw: &str, why: impl fmt::Display) -> Self {
        Self {
            kind: ViolationKind::Grammar,
            path: path.into(),
            input: raw.to_string(),
            explain: Cow::Owned(format!("invalid rule '{raw}': {why}")),
            message: None,
        }
    }

    /// Creates a violation for an unresolvable checker name.
    pub fn unknown_checker(path: impl Into<String>, name: &str) -> Self {
        Self {
            kind: ViolationKind::UnknownChecker,
            path: path.into(),
            input: name.to_string(),
            explain: Cow::Owned(format!("unknown checker '{name}'")),
            message: None,
        }
    }

    /// Creates a type-mismatch violation (string-only checker, non-string
    /// field).
    pub fn type_mismatch(
        path: impl Into<String>,
        input: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self {
            kind: ViolationKind::TypeMismatch,
            path: path.into(),
            input: input.into(),
            explain: Cow::Owned(format!("it is not {expected}")),
            message: None,
        }
    }

    /// Attaches a custom message, replacing the generated text.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.message = Some(message);
        }
        self
    }

    /// Attaches a custom message only if one is present.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message_opt(self, message: Option<&str>) -> Self {
        match message {
            Some(m) => self.with_message(m),
            None => self,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(custom) => f.write_str(custom),
            None => write!(
                f,
                "\"{}\" input \"{}\", explain: {}",
                self.path, self.input, self.explain
            ),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Ordered, deduplicated accumulator of rendered violations.
///
/// Entries keep first-seen order; inserting an identical entry twice is a
/// no-op, which is what makes repeated rules against the same field produce
/// a stable, minimal report.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: IndexSet<String>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders and records a violation.
    pub fn push(&mut self, violation: Violation) {
        self.entries.insert(violation.to_string());
    }

    /// Records a pre-rendered entry (used by the cross-field evaluator,
    /// whose entries span several paths).
    pub fn push_text(&mut self, text: String) {
        self.entries.insert(text);
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Drops all entries, keeping allocated capacity for reuse.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Joins all entries with `"; "` into the final error text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            out.push_str(entry);
        }
        out
    }

    /// Converts the report into the caller-facing result.
    pub fn into_result(self) -> Result<(), ValidError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidError::Invalid(self.render()))
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// PUBLIC ERROR TAXONOMY
// ============================================================================

/// The error returned by every validation entry point.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidError {
    /// One or more constraints were violated. The payload is the full
    /// rendered report, entries joined by `"; "`.
    #[error("{0}")]
    Invalid(String),

    /// The root input itself was unusable; the walk never started and no
    /// partial report exists.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
}

impl ValidError {
    /// True for the aggregate-violation case.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Root-input failures that abort a validation call immediately.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    /// The root value serialized to `null` (a nil pointer / `None`).
    #[error("nil value passed as validation root")]
    NilRoot,

    /// The root was expected to be a record but was a scalar.
    #[error("expected a composite root, got {0}")]
    NotComposite(&'static str),

    /// A collection root contained a non-record element.
    #[error("unsupported element kind in composite root: {0}")]
    UnsupportedElement(&'static str),

    /// The root value could not be serialized into the dynamic value model.
    #[error("root value is not serializable: {0}")]
    Serialize(String),
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_renders_generated_text() {
        let v = Violation::constraint("User.Name", "", "it is required");
        assert_eq!(v.to_string(), "\"User.Name\" input \"\", explain: it is required");
    }

    #[test]
    fn custom_message_replaces_generated_text() {
        let v = Violation::constraint("User.Name", "", "it is required")
            .with_message("please fill in your name");
        assert_eq!(v.to_string(), "please fill in your name");
    }

    #[test]
    fn empty_custom_message_is_ignored() {
        let v = Violation::constraint("A", "x", "bad").with_message("");
        assert!(v.message.is_none());
    }

    #[test]
    fn report_deduplicates_and_preserves_order() {
        let mut report = Report::new();
        report.push(Violation::constraint("A", "1", "first"));
        report.push(Violation::constraint("B", "2", "second"));
        report.push(Violation::constraint("A", "1", "first"));

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.render(),
            "\"A\" input \"1\", explain: first; \"B\" input \"2\", explain: second"
        );
    }

    #[test]
    fn empty_report_is_ok() {
        assert!(Report::new().into_result().is_ok());
    }

    #[test]
    fn non_empty_report_is_invalid() {
        let mut report = Report::new();
        report.push(Violation::constraint("A", "1", "bad"));
        let err = report.into_result().unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.to_string(), "\"A\" input \"1\", explain: bad");
    }

    #[test]
    fn input_error_is_not_invalid() {
        let err = ValidError::from(InputError::NilRoot);
        assert!(!err.is_invalid());
        assert_eq!(err.to_string(), "invalid input: nil value passed as validation root");
    }

    #[test]
    fn reset_keeps_report_usable() {
        let mut report = Report::new();
        report.push(Violation::constraint("A", "1", "bad"));
        report.reset();
        assert!(report.is_empty());
    }
}
