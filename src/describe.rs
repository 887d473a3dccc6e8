//! Per-type field metadata: the capability the engine uses instead of
//! runtime reflection.
//!
//! Serialization into the dynamic value model erases Rust types, so nested
//! records carry their embedded rules through a per-field descriptor hook:
//! a plain function pointer that resolves the child type's [`TypeSpec`]
//! (through the global cache) at traversal time.
//!
//! Implement [`Describe`] with the [`describe!`](crate::describe!) macro;
//! hand-written impls are only needed for exotic layouts.

use std::sync::Arc;

use crate::cache;

/// Resolves a type's descriptor for a tag namespace, going through the
/// global descriptor cache.
pub type SpecFn = fn(&str) -> Arc<TypeSpec>;

/// How a composite field relates to its element descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    /// The field is itself a record of the described type.
    Record,
    /// The field is a sequence or map whose elements are records of the
    /// described type.
    Elements,
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// Descriptor for one field of a described type.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name as it appears in the serialized form.
    pub name: &'static str,
    /// Unexported fields are skipped entirely by the engine.
    pub exported: bool,
    /// Embedded rule string for the requested tag namespace; empty when the
    /// field carries no rules under that tag.
    pub rule: &'static str,
    /// Opaque leaf types (timestamps and the like) are never recursed into.
    pub opaque: bool,
    /// Descriptor hook for composite fields.
    pub nested: Option<(NestedKind, SpecFn)>,
}

impl FieldSpec {
    /// A scalar leaf field.
    #[must_use]
    pub fn leaf(name: &'static str, rule: &'static str) -> Self {
        Self {
            name,
            exported: true,
            rule,
            opaque: false,
            nested: None,
        }
    }

    /// A record field of described type `N`.
    #[must_use]
    pub fn nested<N: Describe>(name: &'static str, rule: &'static str) -> Self {
        Self {
            nested: Some((NestedKind::Record, spec_hook::<N>)),
            ..Self::leaf(name, rule)
        }
    }

    /// A collection field whose elements are records of described type `N`.
    #[must_use]
    pub fn each<N: Describe>(name: &'static str, rule: &'static str) -> Self {
        Self {
            nested: Some((NestedKind::Elements, spec_hook::<N>)),
            ..Self::leaf(name, rule)
        }
    }

    /// An opaque leaf: traversal treats it as already valid and never
    /// descends, regardless of its serialized shape.
    #[must_use]
    pub fn opaque(name: &'static str, rule: &'static str) -> Self {
        Self {
            opaque: true,
            ..Self::leaf(name, rule)
        }
    }

    /// An unexported field: enumerated but never validated or recursed.
    #[must_use]
    pub fn skipped(name: &'static str) -> Self {
        Self {
            exported: false,
            ..Self::leaf(name, "")
        }
    }
}

fn spec_hook<N: Describe>(tag: &str) -> Arc<TypeSpec> {
    spec_of::<N>(tag)
}

// ============================================================================
// TYPE SPEC
// ============================================================================

/// Ordered field descriptors for one type under one tag namespace.
///
/// Computed lazily on first encounter, cached by `(TypeId, tag)`, and
/// immutable thereafter — concurrent readers only ever see the finished
/// descriptor behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    /// Type name used as the root segment of error paths.
    pub type_name: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

// ============================================================================
// DESCRIBE TRAIT
// ============================================================================

/// Supplies field metadata for a type.
///
/// `build_spec` enumerates the fields once for a tag namespace; callers go
/// through [`spec_of`], which caches the result. The enumeration must be
/// pure: same tag in, same descriptor out.
pub trait Describe: 'static {
    /// Type name used in error paths.
    fn type_name() -> &'static str;

    /// Enumerates field descriptors for the given tag namespace (uncached).
    fn build_spec(tag: &str) -> TypeSpec;
}

/// Cached descriptor lookup for `T` under `tag`.
#[must_use]
pub fn spec_of<T: Describe>(tag: &str) -> Arc<TypeSpec> {
    cache::global().get_or_build(std::any::TypeId::of::<T>(), tag, || T::build_spec(tag))
}

// Pointer-like wrappers validate as their pointee; a `None` root is the
// nil-pointer input error, handled by the engine's root dispatch.
impl<T: Describe> Describe for Option<T> {
    fn type_name() -> &'static str {
        T::type_name()
    }
    fn build_spec(tag: &str) -> TypeSpec {
        T::build_spec(tag)
    }
}

impl<T: Describe> Describe for Box<T> {
    fn type_name() -> &'static str {
        T::type_name()
    }
    fn build_spec(tag: &str) -> TypeSpec {
        T::build_spec(tag)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Inner;

    impl Describe for Inner {
        fn type_name() -> &'static str {
            "Inner"
        }
        fn build_spec(tag: &str) -> TypeSpec {
            let rule = if tag == "valid" { "required" } else { "" };
            TypeSpec {
                type_name: "Inner",
                fields: vec![FieldSpec::leaf("code", rule)],
            }
        }
    }

    struct Outer;

    impl Describe for Outer {
        fn type_name() -> &'static str {
            "Outer"
        }
        fn build_spec(tag: &str) -> TypeSpec {
            let _ = tag;
            TypeSpec {
                type_name: "Outer",
                fields: vec![
                    FieldSpec::nested::<Inner>("inner", ""),
                    FieldSpec::skipped("private"),
                    FieldSpec::opaque("stamp", ""),
                ],
            }
        }
    }

    #[test]
    fn nested_hook_resolves_child_spec() {
        let spec = spec_of::<Outer>("valid");
        let (kind, hook) = spec.fields[0].nested.expect("nested hook");
        assert_eq!(kind, NestedKind::Record);
        let child = hook("valid");
        assert_eq!(child.type_name, "Inner");
        assert_eq!(child.fields[0].rule, "required");
    }

    #[test]
    fn tag_mismatch_leaves_rules_empty_but_fields_enumerated() {
        let child = spec_of::<Inner>("other");
        assert_eq!(child.fields.len(), 1);
        assert_eq!(child.fields[0].rule, "");
    }

    #[test]
    fn skipped_and_opaque_flags() {
        let spec = spec_of::<Outer>("valid");
        assert!(!spec.fields[1].exported);
        assert!(spec.fields[2].opaque);
    }

    #[test]
    fn option_delegates_to_pointee() {
        assert_eq!(<Option<Inner>>::type_name(), "Inner");
        assert_eq!(<Box<Inner>>::type_name(), "Inner");
    }
}
