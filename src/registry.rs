//! Checker registry: built-ins, process-wide custom checkers, and the
//! per-call snapshot.
//!
//! The built-in set lives in a static table. Custom checkers register into
//! a read-write-locked map; each validation call takes a snapshot of that
//! map up front, so a registration racing an in-flight call can never make
//! one field resolve differently from the next within the same walk.
//!
//! Resolution order: call-scoped checker, then process-wide custom, then
//! built-in. A custom checker may therefore shadow a built-in name.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::checkers::{self, BuiltinFn};
use crate::error::Report;
use crate::parser::Token;

/// Boxed custom checker. Same contract as the built-ins: append violations
/// to the report, never return.
pub type CheckerFn = Arc<dyn Fn(&mut Report, &Token, &str, &str, &Value) + Send + Sync>;

static CUSTOM: LazyLock<RwLock<HashMap<String, CheckerFn>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Registers a process-wide custom checker, effective for all subsequent
/// validation calls. Last write wins for a repeated name.
pub fn register_checker(
    name: impl Into<String>,
    checker: impl Fn(&mut Report, &Token, &str, &str, &Value) + Send + Sync + 'static,
) {
    let name = name.into();
    debug!(name, "registering custom checker");
    CUSTOM.write().insert(name, Arc::new(checker));
}

/// Removes a previously registered custom checker.
pub fn unregister_checker(name: &str) -> bool {
    CUSTOM.write().remove(name).is_some()
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Immutable view of the registry for one validation call.
///
/// Holds clones of the custom checkers' `Arc`s plus at most one call-scoped
/// checker, so resolution inside the walk never touches the lock again.
pub(crate) struct Snapshot {
    custom: HashMap<String, CheckerFn>,
    scoped: Option<(String, CheckerFn)>,
}

impl Snapshot {
    /// Takes a snapshot of the global registry.
    pub(crate) fn take() -> Self {
        Self {
            custom: CUSTOM.read().clone(),
            scoped: None,
        }
    }

    /// Adds a checker visible only to this call.
    pub(crate) fn with_scoped(mut self, name: impl Into<String>, checker: CheckerFn) -> Self {
        self.scoped = Some((name.into(), checker));
        self
    }

    /// Resolves a checker name, or `None` for an unknown one.
    pub(crate) fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some((scoped_name, checker)) = &self.scoped {
            if scoped_name == name {
                return Some(Resolved::Dynamic(checker));
            }
        }
        if let Some(checker) = self.custom.get(name) {
            return Some(Resolved::Dynamic(checker));
        }
        checkers::lookup(name).map(Resolved::Builtin)
    }
}

/// A resolved checker, ready to run.
pub(crate) enum Resolved<'a> {
    Builtin(BuiltinFn),
    Dynamic(&'a CheckerFn),
}

impl Resolved<'_> {
    pub(crate) fn call(
        &self,
        report: &mut Report,
        token: &Token,
        path: &str,
        field: &str,
        value: &Value,
    ) {
        match self {
            Resolved::Builtin(f) => f(report, token, path, field, value),
            Resolved::Dynamic(f) => f(report, token, path, field, value),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
