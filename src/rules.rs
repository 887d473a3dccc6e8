//! The caller-supplied rule map.
//!
//! A [`RuleMap`] is an insertion-ordered mapping from lower-cased field name
//! to a combined rule string. It is how callers override (or supply, for
//! rule-less types) the per-field constraints that would otherwise come from
//! embedded annotations.

use indexmap::IndexMap;

/// Separator used when several `set` calls accumulate onto one field.
const RULE_JOIN: char = ',';

/// Ordered field name → rule string mapping.
///
/// Keys are lower-cased on insertion so lookups are case-insensitive with
/// respect to the declared field name. Repeated [`set`](RuleMap::set) calls
/// for the same field concatenate with `,`, which lets call sites build up
/// a rule incrementally:
///
/// ```
/// use rulecheck::RuleMap;
///
/// let mut rules = RuleMap::new();
/// rules.set("Name", "required");
/// rules.set("name", "to=6~30");
/// assert_eq!(rules.get("name"), Some("required,to=6~30"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleMap {
    rules: IndexMap<String, String>,
}

impl RuleMap {
    /// Creates an empty rule map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule for a field, concatenating with any rule already present.
    pub fn set(&mut self, field: &str, rule: &str) -> &mut Self {
        let key = field.to_lowercase();
        match self.rules.get_mut(&key) {
            Some(existing) if !existing.is_empty() => {
                existing.push(RULE_JOIN);
                existing.push_str(rule);
            }
            Some(existing) => existing.push_str(rule),
            None => {
                self.rules.insert(key, rule.to_string());
            }
        }
        self
    }

    /// Looks up the combined rule string for a field (case-insensitive).
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        let key = field.to_lowercase();
        self.rules.get(&key).map(String::as_str)
    }

    /// Number of fields with rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates `(field, rule)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<F: Into<String>, R: Into<String>> FromIterator<(F, R)> for RuleMap {
    fn from_iter<I: IntoIterator<Item = (F, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, rule) in iter {
            map.set(&field.into(), &rule.into());
        }
        map
    }
}

// ============================================================================
// TESTS
// ============================================================================
