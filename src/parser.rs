//! Rule grammar parser.
//!
//! A rule string is a comma-separated list of constraints:
//!
//! ```text
//! required,to=6~30,re='^[a-z,]+$'|lowercase only
//! ```
//!
//! Commas inside a single-quoted regex literal must not split the string, so
//! the splitter maintains a one-entry quote state: entering `'` pushes it,
//! the matching unescaped `'` pops it, and only commas seen outside quote
//! state are split points. Each constraint then parses into a [`Token`] of
//! `(name, argument, custom message)`.

use smallvec::SmallVec;

/// Parse failure for a rule string or token argument.
///
/// Grammar errors are field-scoped: the engine reports them inline and the
/// walk continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarIssue(pub String);

impl std::fmt::Display for GrammarIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn issue(msg: impl Into<String>) -> GrammarIssue {
    GrammarIssue(msg.into())
}

// ============================================================================
// TOKEN
// ============================================================================

/// One parsed constraint within a rule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Checker name, e.g. `to`, `re`, `required`.
    pub name: String,
    /// Free-form argument: range `1~3`, set `(a/b/c)`, regex `'pat'`, a
    /// separator, or empty for bare tokens like `required`.
    pub arg: String,
    /// Custom message that fully replaces the generated explanation.
    pub message: Option<String>,
}

impl Token {
    /// Builds a token directly (used by tests and call-scoped checkers).
    #[must_use]
    pub fn new(name: impl Into<String>, arg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: arg.into(),
            message: None,
        }
    }

    /// The argument, or `default` when the argument is empty.
    #[must_use]
    pub fn arg_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.arg.is_empty() { default } else { &self.arg }
    }

    /// Custom message as an `Option<&str>`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

// ============================================================================
// RULE STRING SPLITTING
// ============================================================================

/// Splits a combined rule string into raw constraint tokens.
///
/// Respects single-quoted regex literals (`re='a,b'` stays one token) and
/// `\'` escapes inside them. Empty segments are dropped.
///
/// # Errors
///
/// Returns a [`GrammarIssue`] when a quote is left unterminated; the whole
/// rule string is unusable in that case.
pub fn split_rules(rule: &str) -> Result<SmallVec<[String; 8]>, GrammarIssue> {
    let mut tokens = SmallVec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut escaped = false;

    for ch in rule.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => {
                current.push(ch);
                escaped = true;
            }
            '\'' => {
                current.push(ch);
                in_quote = !in_quote;
            }
            ',' if !in_quote => {
                let token = current.trim();
                if !token.is_empty() {
                    tokens.push(token.to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if in_quote {
        return Err(issue("unterminated regex literal"));
    }

    let token = current.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
    Ok(tokens)
}

// ============================================================================
// TOKEN PARSING
// ============================================================================

/// Parses one raw constraint into `(name, argument, custom message)`.
///
/// Splits on the first `=` for `(name, value)`, then on the first unescaped
/// `|` for the custom message. When the value is a quoted regex literal the
/// literal's boundary is located first and the `|` search resumes after it,
/// so `re='a|b'|msg` keeps `a|b` intact.
///
/// A bare token with no `=` (e.g. `required`) yields an empty argument.
#[must_use]
pub fn parse_token(raw: &str) -> Token {
    let raw = raw.trim();
    let Some(eq) = raw.find('=') else {
        return Token::new(raw, "");
    };

    let name = raw[..eq].trim().to_string();
    let rest = &raw[eq + 1..];

    let search_from = quoted_literal_end(rest).unwrap_or(0);
    let pipe = find_unescaped(rest, '|', search_from);

    let (arg, message) = match pipe {
        Some(i) => (&rest[..i], Some(unescape_pipes(&rest[i + 1..]))),
        None => (rest, None),
    };

    Token {
        name,
        arg: unescape_pipes(arg.trim()),
        message,
    }
}

/// Byte offset just past the closing quote of a leading `'…'` literal,
/// or `None` when the value does not start with one.
fn quoted_literal_end(value: &str) -> Option<usize> {
    let trimmed_start = value.len() - value.trim_start().len();
    let rest = &value[trimmed_start..];
    if !rest.starts_with('\'') {
        return None;
    }
    let body_start = trimmed_start + 1;
    let mut escaped = false;
    for (i, ch) in value[body_start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '\'' => return Some(body_start + i + 1),
            _ => {}
        }
    }
    None
}

/// First unescaped occurrence of `needle` at or after `from`.
fn find_unescaped(haystack: &str, needle: char, from: usize) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in haystack.char_indices() {
        if i < from {
            escaped = ch == '\\' && !escaped;
            continue;
        }
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == needle {
            return Some(i);
        }
    }
    None
}

fn unescape_pipes(s: &str) -> String {
    s.replace("\\|", "|")
}

// ============================================================================
// ARGUMENT HELPERS
// ============================================================================

/// Parses a `min~max` range argument. Either side may be empty, which reads
/// as zero (and zero bounds are "unset" for the range family).
pub fn parse_range(arg: &str) -> Result<(f64, f64), GrammarIssue> {
    let Some((lo, hi)) = arg.split_once('~') else {
        return Err(issue(format!("malformed range '{arg}', expected 'min~max'")));
    };
    Ok((parse_bound(lo)?, parse_bound(hi)?))
}

/// Parses a single numeric bound; empty reads as zero.
pub fn parse_bound(arg: &str) -> Result<f64, GrammarIssue> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(0.0);
    }
    arg.parse::<f64>()
        .map_err(|_| issue(format!("malformed numeric bound '{arg}'")))
}

/// Parses a `(a/b/c)` membership set argument.
pub fn parse_set(arg: &str) -> Result<Vec<String>, GrammarIssue> {
    let arg = arg.trim();
    let inner = arg
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| issue(format!("malformed membership set '{arg}', expected '(a/b/c)'")))?;
    if inner.is_empty() {
        return Err(issue("empty membership set"));
    }
    Ok(inner.split('/').map(|s| s.trim().to_string()).collect())
}

/// Extracts the pattern from a single-quoted regex literal, unescaping `\'`.
pub fn regex_literal(arg: &str) -> Result<String, GrammarIssue> {
    let arg = arg.trim();
    let inner = arg
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(|| issue("regex pattern must be a single-quoted literal"))?;
    Ok(inner.replace("\\'", "'"))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_plain_rules() {
        let tokens = split_rules("required,to=1~10,email").unwrap();
        assert_eq!(tokens.as_slice(), ["required", "to=1~10", "email"]);
    }

    #[test]
    fn comma_inside_regex_literal_does_not_split() {
        let tokens = split_rules("required,re='a,b'").unwrap();
        assert_eq!(tokens.as_slice(), ["required", "re='a,b'"]);
    }

    #[test]
    fn escaped_quote_stays_inside_literal() {
        let tokens = split_rules(r"re='it\'s,ok'").unwrap();
        assert_eq!(tokens.as_slice(), [r"re='it\'s,ok'"]);
    }

    #[test]
    fn unterminated_quote_is_grammar_error() {
        assert!(split_rules("re='abc").is_err());
    }

    #[test]
    fn empty_segments_are_dropped() {
        let tokens = split_rules("required,,to=1~3,").unwrap();
        assert_eq!(tokens.as_slice(), ["required", "to=1~3"]);
    }

    #[test]
    fn bare_token_has_empty_argument() {
        let token = parse_token("required");
        assert_eq!(token, Token::new("required", ""));
    }

    #[test]
    fn token_round_trip_with_message() {
        let token = parse_token("to=1~3|msg");
        assert_eq!(token.name, "to");
        assert_eq!(token.arg, "1~3");
        assert_eq!(token.message(), Some("msg"));
    }

    #[test]
    fn pipe_inside_regex_literal_is_kept() {
        let token = parse_token("re='a|b'|either letter");
        assert_eq!(token.arg, "'a|b'");
        assert_eq!(token.message(), Some("either letter"));
    }

    #[test]
    fn multibyte_whitespace_before_regex_literal() {
        // U+3000 is three bytes; the literal boundary must not drift.
        let token = parse_token("re=\u{3000}'a|b'|msg");
        assert_eq!(token.arg, "'a|b'");
        assert_eq!(token.message(), Some("msg"));
    }

    #[test]
    fn escaped_pipe_in_value_is_unescaped() {
        let token = parse_token(r"in=(a\|b/c)|pick one");
        assert_eq!(token.arg, "(a|b/c)");
        assert_eq!(token.message(), Some("pick one"));
    }

    #[test]
    fn only_first_equals_splits() {
        let token = parse_token("eq=3=x");
        assert_eq!(token.name, "eq");
        assert_eq!(token.arg, "3=x");
    }

    #[test]
    fn range_parses_both_bounds() {
        assert_eq!(parse_range("1~3").unwrap(), (1.0, 3.0));
        assert_eq!(parse_range("0~5").unwrap(), (0.0, 5.0));
        assert_eq!(parse_range("~5").unwrap(), (0.0, 5.0));
    }

    #[test]
    fn malformed_range_is_rejected() {
        assert!(parse_range("13").is_err());
        assert!(parse_range("a~b").is_err());
    }

    #[test]
    fn set_parses_members() {
        assert_eq!(parse_set("(a/b/c)").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn malformed_set_is_rejected() {
        assert!(parse_set("a/b/c").is_err());
        assert!(parse_set("()").is_err());
    }

    #[test]
    fn regex_literal_strips_quotes() {
        assert_eq!(regex_literal("'^a+$'").unwrap(), "^a+$");
        assert_eq!(regex_literal(r"'it\'s'").unwrap(), "it's");
        assert!(regex_literal("^a+$").is_err());
    }
}
