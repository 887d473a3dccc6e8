//! The built-in constraint library.
//!
//! Every checker shares one signature: it receives the shared [`Report`],
//! the parsed [`Token`], the field's full path, the bare field name, and the
//! dynamic value. Checkers never return errors — they append a violation to
//! the report, or append nothing when the constraint holds.
//!
//! Families:
//!
//! - **Range** (`to`, `oto`, `ge`, `le`, `gt`, `lt`) — closed/open bounds
//!   over rune count, numeric magnitude, or collection length.
//! - **Equality** (`eq`, `noeq`) — size/magnitude against one integer.
//! - **Membership** (`in`, `include`) — `(a/b/c)` set arguments.
//! - **Format** (`phone`, `email`, `idcard`, `ip`, `ipv4`, `date`,
//!   `datetime`, `year`, `year2month`, `re`) — regex-based, string-only.
//! - **Content** (`prefix`, `suffix`) — string start/end comparison.
//! - **Numeric shape** (`int`, `float`, `ints`) — string-encoded or native.
//! - **`json`** — the string must parse as a JSON document.
//! - **`unique`** — no duplicate stringified elements.

pub(crate) mod content;
pub(crate) mod equality;
pub(crate) mod format;
pub(crate) mod json;
pub(crate) mod membership;
pub(crate) mod numeric;
pub(crate) mod range;
pub(crate) mod unique;

use serde_json::Value;

use crate::error::Report;
use crate::parser::Token;

/// Signature shared by every built-in checker.
pub type BuiltinFn = fn(&mut Report, &Token, &str, &str, &Value);

/// Resolves a built-in checker by rule-token name.
#[must_use]
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    Some(match name {
        "to" => range::to,
        "oto" => range::oto,
        "ge" => range::ge,
        "gt" => range::gt,
        "le" => range::le,
        "lt" => range::lt,
        "eq" => equality::eq,
        "noeq" => equality::noeq,
        "in" => membership::within,
        "include" => membership::include,
        "phone" => format::phone,
        "email" => format::email,
        "idcard" => format::idcard,
        "ip" | "ipv4" => format::ipv4,
        "date" => format::date,
        "datetime" => format::datetime,
        "year" => format::year,
        "year2month" => format::year2month,
        "re" => format::re,
        "prefix" => content::prefix,
        "suffix" => content::suffix,
        "int" => numeric::int,
        "float" => numeric::float,
        "ints" => numeric::ints,
        "json" => json::json,
        "unique" => unique::unique,
        _ => return None,
    })
}
