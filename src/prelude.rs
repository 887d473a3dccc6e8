//! Prelude module for convenient imports.
//!
//! Provides a single `use rulecheck::prelude::*;` import that brings in the
//! entry points, the rule map, the error types, and the `describe!` macro's
//! supporting items.
//!
//! # Examples
//!
//! ```rust
//! use rulecheck::prelude::*;
//!
//! let rules: RuleMap = [("name", "required,to=2~20")].into_iter().collect();
//! assert!(validate_url("name=bob", &rules).is_ok());
//! ```

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::api::{
    validate_struct, validate_struct_tagged, validate_struct_with_custom_fn,
    validate_struct_with_custom_fn_tagged, validate_struct_with_rules,
    validate_struct_with_rules_tagged, validate_structs, validate_url, validate_value,
    DEFAULT_TAG,
};

// ============================================================================
// REGISTRY
// ============================================================================

pub use crate::registry::{register_checker, unregister_checker, CheckerFn};

// ============================================================================
// CORE TYPES
// ============================================================================

pub use crate::describe::{Describe, FieldSpec, NestedKind, TypeSpec};
pub use crate::error::{InputError, Report, ValidError, Violation, ViolationKind};
pub use crate::parser::Token;
pub use crate::rules::RuleMap;

// ============================================================================
// MACROS
// ============================================================================

pub use crate::describe;
