//! Label extraction from changelogs and field snapshots.
//!
//! The two sources encode labels differently: changelog strings are joined
//! with `,` while rendered field text is joined with `, `.

use super::{LabelSet, LABELS_FIELD};
use crate::ports::tracker::{ChangelogEntry, Field};

const CHANGELOG_SEPARATOR: &str = ",";
const FIELD_SEPARATOR: &str = ", ";

/// Returns the labels before and after the first labels change in `entries`.
///
/// Both sets are empty when the changelog does not touch labels.
#[must_use]
pub fn diff(entries: &[ChangelogEntry]) -> (LabelSet, LabelSet) {
    entries.iter().find(|entry| entry.field == LABELS_FIELD).map_or_else(
        || (LabelSet::default(), LabelSet::default()),
        |entry| {
            (
                LabelSet::split(entry.from_value.as_deref().unwrap_or_default(), CHANGELOG_SEPARATOR),
                LabelSet::split(entry.to_value.as_deref().unwrap_or_default(), CHANGELOG_SEPARATOR),
            )
        },
    )
}

/// How the trigger label moved between two label sets.
///
/// Both flags are computed independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerChange {
    /// The trigger label is new in this transition.
    pub added: bool,
    /// The trigger label was dropped in this transition.
    pub removed: bool,
}

impl TriggerChange {
    /// Compares the presence of `trigger_label` in `old` and `new`.
    #[must_use]
    pub fn classify(trigger_label: &str, old: &LabelSet, new: &LabelSet) -> Self {
        Self {
            added: new.contains(trigger_label) && !old.contains(trigger_label),
            removed: !new.contains(trigger_label) && old.contains(trigger_label),
        }
    }
}

/// Returns the labels currently rendered in an issue's field snapshot.
///
/// An issue without a labels field yields a single empty label.
#[must_use]
pub fn extract_from_fields(fields: &[Field]) -> LabelSet {
    let text = fields
        .iter()
        .find(|field| field.id == LABELS_FIELD)
        .map_or("", |field| field.text.as_str());
    LabelSet::split(text, FIELD_SEPARATOR)
}
