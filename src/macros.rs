//! The [`describe!`] macro: field metadata with minimal boilerplate.
//!
//! Serialization erases Rust types, so the engine learns a record's fields
//! and embedded rules from its [`Describe`](crate::describe::Describe)
//! impl. Writing those impls by hand is mechanical; `describe!` generates
//! them from a field list.

// ============================================================================
// DESCRIBE MACRO
// ============================================================================

/// Implements [`Describe`](crate::describe::Describe) for a type from a
/// field list.
///
/// Field forms:
///
/// - `name => "rule"` — a leaf field with an embedded rule (use `""` for a
///   field that is traversed but carries no rule).
/// - `name: nested Child => "rule"` — a record field; traversal descends
///   into `Child`'s own described fields.
/// - `name: each Child => "rule"` — a sequence or map whose elements are
///   `Child` records; traversal descends into every element.
/// - `name: opaque => "rule"` — a leaf that is never descended into, no
///   matter how it serializes (timestamps and the like).
/// - `name: skip` — enumerated but never validated or recursed.
///
/// The optional `, tag = "…"` clause names the tag namespace the rules
/// belong to (default `"valid"`). Requesting a different tag at validation
/// time yields the same fields with empty rules.
///
/// ```
/// use rulecheck::{describe, validate_struct};
///
/// #[derive(serde::Serialize)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(serde::Serialize)]
/// struct User {
///     name: String,
///     age: u32,
///     home: Address,
/// }
///
/// describe!(Address {
///     city => "required",
/// });
///
/// describe!(User {
///     name => "required,to=2~20",
///     age => "to=1~130",
///     home: nested Address => "",
/// });
///
/// let user = User {
///     name: "bob".to_string(),
///     age: 44,
///     home: Address { city: "Oslo".to_string() },
/// };
/// assert!(validate_struct(&user).is_ok());
/// ```
#[macro_export]
macro_rules! describe {
    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------
    ($ty:ty { $($fields:tt)* }) => {
        $crate::describe!(@impl $ty, "valid", $($fields)*);
    };
    ($ty:ty, tag = $tag:literal { $($fields:tt)* }) => {
        $crate::describe!(@impl $ty, $tag, $($fields)*);
    };

    (@impl $ty:ty, $tag:literal, $($fields:tt)*) => {
        impl $crate::describe::Describe for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn build_spec(tag: &str) -> $crate::describe::TypeSpec {
                let matched = tag == $tag;
                let mut fields = ::std::vec::Vec::new();
                $crate::describe!(@fields fields, matched, $($fields)*);
                $crate::describe::TypeSpec {
                    type_name: stringify!($ty),
                    fields,
                }
            }
        }
    };

    // ------------------------------------------------------------------
    // Field muncher
    // ------------------------------------------------------------------
    (@fields $vec:ident, $matched:ident,) => {};
    (@fields $vec:ident, $matched:ident, $field:ident : nested $nty:ty => $rule:literal $(, $($rest:tt)*)?) => {
        $vec.push($crate::describe::FieldSpec::nested::<$nty>(
            stringify!($field),
            if $matched { $rule } else { "" },
        ));
        $($crate::describe!(@fields $vec, $matched, $($rest)*);)?
    };
    (@fields $vec:ident, $matched:ident, $field:ident : each $nty:ty => $rule:literal $(, $($rest:tt)*)?) => {
        $vec.push($crate::describe::FieldSpec::each::<$nty>(
            stringify!($field),
            if $matched { $rule } else { "" },
        ));
        $($crate::describe!(@fields $vec, $matched, $($rest)*);)?
    };
    (@fields $vec:ident, $matched:ident, $field:ident : opaque => $rule:literal $(, $($rest:tt)*)?) => {
        $vec.push($crate::describe::FieldSpec::opaque(
            stringify!($field),
            if $matched { $rule } else { "" },
        ));
        $($crate::describe!(@fields $vec, $matched, $($rest)*);)?
    };
    (@fields $vec:ident, $matched:ident, $field:ident : skip $(, $($rest:tt)*)?) => {
        $vec.push($crate::describe::FieldSpec::skipped(stringify!($field)));
        $($crate::describe!(@fields $vec, $matched, $($rest)*);)?
    };
    (@fields $vec:ident, $matched:ident, $field:ident => $rule:literal $(, $($rest:tt)*)?) => {
        $vec.push($crate::describe::FieldSpec::leaf(
            stringify!($field),
            if $matched { $rule } else { "" },
        ));
        $($crate::describe!(@fields $vec, $matched, $($rest)*);)?
    };
}

// ============================================================================
// TESTS
// ============================================================================
