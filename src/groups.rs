//! Cross-field group evaluation: `either` and `bothEq`.
//!
//! During traversal the engine only collects participants; evaluation runs
//! once after the walk. Groups live in an insertion-ordered map, so when
//! several distinct groups fail their entries appear in first-seen order —
//! the same input always renders the same report.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Report;
use crate::value::is_zero;

/// Which joint constraint a group enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum GroupKind {
    /// At least one participant must be non-zero.
    Either,
    /// All participants must be pairwise deep-equal.
    BothEq,
}

/// Identity of a group: kind plus the caller-chosen group name, so
/// `either=a` and `bothEq=a` are distinct groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct GroupKey {
    pub kind: GroupKind,
    pub name: String,
}

/// One field's participation in a group.
#[derive(Debug, Clone)]
pub(crate) struct GroupEntry {
    /// Full path of the participating field.
    pub path: String,
    /// Custom message from the participant's token, if any.
    pub message: Option<String>,
    /// The participant's value at traversal time.
    pub value: Value,
}

/// Insertion-ordered group accumulator.
pub(crate) type Groups = IndexMap<GroupKey, Vec<GroupEntry>>;

/// Records one participant.
pub(crate) fn collect(
    groups: &mut Groups,
    kind: GroupKind,
    name: &str,
    path: &str,
    message: Option<&str>,
    value: &Value,
) {
    groups
        .entry(GroupKey {
            kind,
            name: name.to_string(),
        })
        .or_default()
        .push(GroupEntry {
            path: path.to_string(),
            message: message.map(str::to_string),
            value: value.clone(),
        });
}

/// Evaluates every collected group, appending violations to the report.
pub(crate) fn evaluate(groups: &Groups, report: &mut Report) {
    for (key, entries) in groups {
        let violated = match key.kind {
            // A single participant makes "either" meaningless, so it is
            // itself a violation; otherwise all-zero violates.
            GroupKind::Either => entries.len() == 1 || entries.iter().all(|e| is_zero(&e.value)),
            GroupKind::BothEq => {
                entries.len() == 1
                    || entries.iter().any(|e| e.value != entries[0].value)
            }
        };
        if !violated {
            continue;
        }

        if let Some(custom) = entries.iter().find_map(|e| e.message.as_deref()) {
            report.push_text(custom.to_string());
            continue;
        }

        let mut text = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                text.push_str(", ");
            }
            text.push('"');
            text.push_str(&entry.path);
            text.push('"');
        }
        text.push_str(", explain: ");
        text.push_str(match key.kind {
            GroupKind::Either => "they shouldn't all be empty",
            GroupKind::BothEq => "they should all be equal",
        });
        report.push_text(text);
    }
}

// ============================================================================
// TESTS
// ============================================================================
