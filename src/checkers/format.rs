//! Format checkers: regex-based, string-only.
//!
//! Fixed patterns compile once per process. The date-like checkers accept a
//! custom separator argument (default `-`), so their patterns are built on
//! demand and memoized per separator. `re='…'` compiles the caller's
//! pattern and reports a grammar violation when it is invalid.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;

use crate::error::{Report, Violation};
use crate::parser::{self, Token};
use crate::value::render;

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("phone pattern"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});
static IDCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{17}[\dXx]$").expect("idcard pattern"));
static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)(\.(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)){3}$")
        .expect("ipv4 pattern")
});
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").expect("year pattern"));

/// Memoized separator-parameterized patterns, keyed by the final pattern
/// text.
static SEPARATED: LazyLock<RwLock<HashMap<String, Regex>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn str_input<'v>(
    report: &mut Report,
    token: &Token,
    path: &str,
    value: &'v Value,
) -> Option<&'v str> {
    match value {
        Value::String(s) => Some(s),
        other => {
            report.push(
                Violation::type_mismatch(path, render(other), "a string")
                    .with_message_opt(token.message()),
            );
            None
        }
    }
}

fn check_fixed(
    report: &mut Report,
    token: &Token,
    path: &str,
    value: &Value,
    pattern: &Regex,
    what: &'static str,
) {
    let Some(s) = str_input(report, token, path, value) else { return };
    if !pattern.is_match(s) {
        report.push(
            Violation::constraint(path, s.to_string(), format!("it is not a valid {what}"))
                .with_message_opt(token.message()),
        );
    }
}

fn check_separated(
    report: &mut Report,
    token: &Token,
    path: &str,
    value: &Value,
    build: impl FnOnce(&str) -> String,
    what: &'static str,
) {
    let Some(s) = str_input(report, token, path, value) else { return };
    let sep = regex::escape(token.arg_or("-"));
    let pattern_text = build(&sep);

    let matched = {
        let cache = SEPARATED.read();
        cache.get(&pattern_text).map(|re| re.is_match(s))
    };
    let matched = match matched {
        Some(m) => m,
        None => {
            // Pattern text is generated from an escaped separator, so the
            // compile cannot fail for caller reasons.
            let re = Regex::new(&pattern_text).expect("separator pattern");
            let m = re.is_match(s);
            SEPARATED.write().entry(pattern_text).or_insert(re);
            m
        }
    };

    if !matched {
        report.push(
            Violation::constraint(path, s.to_string(), format!("it is not a valid {what}"))
                .with_message_opt(token.message()),
        );
    }
}

/// `phone` — mobile phone number.
pub(crate) fn phone(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    check_fixed(report, token, path, value, &PHONE, "phone number");
}

/// `email` — email address.
pub(crate) fn email(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    check_fixed(report, token, path, value, &EMAIL, "email address");
}

/// `idcard` — 18-digit resident id card number.
pub(crate) fn idcard(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    check_fixed(report, token, path, value, &IDCARD, "id card number");
}

/// `ip` / `ipv4` — dotted-quad IPv4 address.
pub(crate) fn ipv4(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    check_fixed(report, token, path, value, &IPV4, "IPv4 address");
}

/// `year` — four-digit year.
pub(crate) fn year(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    check_fixed(report, token, path, value, &YEAR, "year");
}

/// `date[=sep]` — `YYYY<sep>M<sep>D`, separator defaults to `-`.
pub(crate) fn date(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    check_separated(
        report,
        token,
        path,
        value,
        |sep| format!(r"^\d{{4}}{sep}\d{{1,2}}{sep}\d{{1,2}}$"),
        "date",
    );
}

/// `datetime[=sep]` — date plus `H:M:S` time.
pub(crate) fn datetime(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    check_separated(
        report,
        token,
        path,
        value,
        |sep| format!(r"^\d{{4}}{sep}\d{{1,2}}{sep}\d{{1,2}} \d{{1,2}}:\d{{1,2}}:\d{{1,2}}$"),
        "datetime",
    );
}

/// `year2month[=sep]` — `YYYY<sep>M`.
pub(crate) fn year2month(
    report: &mut Report,
    token: &Token,
    path: &str,
    _field: &str,
    value: &Value,
) {
    check_separated(
        report,
        token,
        path,
        value,
        |sep| format!(r"^\d{{4}}{sep}\d{{1,2}}$"),
        "year-month",
    );
}

/// `re='pattern'` — the string must match a caller-supplied regex given as
/// a single-quoted literal.
pub(crate) fn re(report: &mut Report, token: &Token, path: &str, _field: &str, value: &Value) {
    let pattern = match parser::regex_literal(&token.arg) {
        Ok(p) => p,
        Err(why) => {
            let raw = format!("{}={}", token.name, token.arg);
            report.push(Violation::grammar(path, &raw, why));
            return;
        }
    };
    let Some(s) = str_input(report, token, path, value) else { return };
    let compiled = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(why) => {
            let raw = format!("{}={}", token.name, token.arg);
            report.push(Violation::grammar(path, &raw, why));
            return;
        }
    };
    if !compiled.is_match(s) {
        report.push(
            Violation::constraint(path, s.to_string(), format!("it does not match {}", token.arg))
                .with_message_opt(token.message()),
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn run(f: crate::checkers::BuiltinFn, arg: &str, value: Value) -> Vec<String> {
        let mut report = Report::new();
        let token = Token::new("x", arg);
        f(&mut report, &token, "T.F", "F", &value);
        report.iter().map(str::to_string).collect()
    }

    #[rstest]
    #[case("13800138000", true)]
    #[case("19912345678", true)]
    #[case("12345678901", false)]
    #[case("1380013800", false)]
    fn phone_numbers(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(run(phone, "", json!(input)).is_empty(), ok);
    }

    #[rstest]
    #[case("a@b.co", true)]
    #[case("first.last+tag@sub.domain.org", true)]
    #[case("not-an-email", false)]
    #[case("a@b", false)]
    fn emails(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(run(email, "", json!(input)).is_empty(), ok);
    }

    #[rstest]
    #[case("11010519491231002X", true)]
    #[case("110105194912310021", true)]
    #[case("1101051949123100", false)]
    fn idcards(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(run(idcard, "", json!(input)).is_empty(), ok);
    }

    #[rstest]
    #[case("127.0.0.1", true)]
    #[case("255.255.255.255", true)]
    #[case("256.1.1.1", false)]
    #[case("1.2.3", false)]
    fn ipv4_addresses(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(run(ipv4, "", json!(input)).is_empty(), ok);
    }

    #[test]
    fn date_uses_default_separator() {
        assert!(run(date, "", json!("2024-07-01")).is_empty());
        assert!(run(date, "", json!("2024-7-1")).is_empty());
        assert!(!run(date, "", json!("2024/07/01")).is_empty());
    }

    #[test]
    fn date_accepts_custom_separator() {
        assert!(run(date, "/", json!("2024/07/01")).is_empty());
        assert!(!run(date, "/", json!("2024-07-01")).is_empty());
    }

    #[test]
    fn datetime_and_year2month() {
        assert!(run(datetime, "", json!("2024-07-01 10:30:00")).is_empty());
        assert!(!run(datetime, "", json!("2024-07-01")).is_empty());
        assert!(run(year2month, "", json!("2024-07")).is_empty());
        assert!(!run(year2month, "", json!("2024-07-01")).is_empty());
    }

    #[test]
    fn year_is_four_digits() {
        assert!(run(year, "", json!("1999")).is_empty());
        assert!(!run(year, "", json!("99")).is_empty());
    }

    #[test]
    fn re_matches_quoted_pattern() {
        assert!(run(re, "'^[a-z]+$'", json!("abc")).is_empty());
        assert!(!run(re, "'^[a-z]+$'", json!("ABC")).is_empty());
    }

    #[test]
    fn re_without_quotes_is_a_grammar_violation() {
        let entries = run(re, "^[a-z]+$", json!("abc"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("invalid rule"));
    }

    #[test]
    fn re_with_invalid_pattern_is_a_grammar_violation() {
        let entries = run(re, "'['", json!("abc"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("invalid rule"));
    }

    #[test]
    fn non_string_input_is_a_type_mismatch() {
        let entries = run(email, "", json!(42));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("not a string"));
    }
}
