//! # rulecheck
//!
//! Declarative constraint validation over arbitrary object graphs.
//!
//! Rules are compact strings (`"required,to=6~30,email"`) attached to
//! fields through the [`describe!`] macro, supplied at the call site as a
//! [`RuleMap`], or passed directly for a single value. Validation walks the
//! whole graph, collects every violation into one report, and returns the
//! lot at once — it never stops at the first failure.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulecheck::{describe, validate_struct};
//!
//! #[derive(serde::Serialize)]
//! struct SignUp {
//!     name: String,
//!     email: String,
//!     age: u32,
//! }
//!
//! describe!(SignUp {
//!     name => "required,to=2~20",
//!     email => "required,email",
//!     age => "to=13~130",
//! });
//!
//! let form = SignUp {
//!     name: "bob".to_string(),
//!     email: "bob@example.com".to_string(),
//!     age: 44,
//! };
//! assert!(validate_struct(&form).is_ok());
//! ```
//!
//! ## Rule grammar
//!
//! A rule string is a comma-separated list of constraint tokens. A token is
//! a bare name (`required`), a name with an argument (`to=1~10`,
//! `in=(a/b/c)`, `re='^[a-z]+$'`), and optionally a `|custom message`
//! suffix that replaces the generated explanation. Commas and pipes inside
//! single-quoted regex literals do not split.
//!
//! ## Built-in checkers
//!
//! - **Presence**: `required` (non-zero value), `exist` (non-nil value)
//! - **Range**: `to`, `oto` (closed/open intervals), `ge`, `gt`, `le`, `lt`
//! - **Equality**: `eq`, `noeq`
//! - **Membership**: `in=(a/b/c)`, `include=(a/b)`
//! - **Format**: `phone`, `email`, `idcard`, `ip`/`ipv4`, `date`,
//!   `datetime`, `year`, `year2month`, `re='…'`, `json`
//! - **Content**: `prefix`, `suffix`
//! - **Numeric shape**: `int`, `float`, `ints`
//! - **Collections**: `unique`
//! - **Cross-field**: `either=<group>`, `bothEq=<group>`
//!
//! Custom checkers register process-wide with [`register_checker`] or per
//! call with [`validate_struct_with_custom_fn`].

pub mod api;
pub mod cache;
mod checkers;
mod context;
pub mod describe;
mod engine;
pub mod error;
mod groups;
mod macros;
pub mod parser;
pub mod prelude;
mod registry;
pub mod rules;
pub mod value;

pub use api::{
    validate_struct, validate_struct_tagged, validate_struct_with_custom_fn,
    validate_struct_with_custom_fn_tagged, validate_struct_with_rules,
    validate_struct_with_rules_tagged, validate_structs, validate_url, validate_value,
    DEFAULT_TAG,
};
pub use describe::Describe;
pub use error::{InputError, Report, ValidError, Violation, ViolationKind};
pub use parser::Token;
pub use registry::{register_checker, unregister_checker, CheckerFn};
pub use rules::RuleMap;
