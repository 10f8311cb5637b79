//! Swimlane decision engine.
//!
//! Turns an issue's label transition into at most one swimlane edit on the
//! dashboard that owns the issue's team. Everything here except
//! [`reconcile`] is pure; `reconcile` drives the tracker port.

pub mod decision;
pub mod labels;
pub mod lookup;
pub mod naming;
pub mod reconcile;
pub mod routing;

use std::fmt;

use crate::ports::tracker::SwimlaneId;

pub use decision::{decide, plan_update};
pub use labels::{diff, extract_from_fields, TriggerChange};
pub use lookup::{exists_by_name, find_by_name};
pub use naming::{name, query};
pub use reconcile::{
    apply, reconcile, route, Changelog, Effect, EventIssue, IssueEvent, Outcome, Route,
};
pub use routing::DashboardRouter;

/// Field id carrying an issue's labels.
pub const LABELS_FIELD: &str = "labels";

/// Field id carrying an issue's one-line summary.
pub const SUMMARY_FIELD: &str = "summary";

/// Label that asks for a swimlane when added to an issue.
pub const DEFAULT_TRIGGER_LABEL: &str = "swimline-story";

/// A set of labels split out of a composite tracker value.
///
/// Labels keep the order in which the tracker listed them; duplicates are
/// dropped. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Splits `text` on `separator` and collects every token, empty ones included.
    #[must_use]
    pub fn split(text: &str, separator: &str) -> Self {
        text.split(separator).collect()
    }

    /// Whether the set holds `label`.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|held| held == label)
    }

    /// Whether the set holds no labels at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of labels in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the labels in the order the tracker listed them.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn insert(&mut self, label: String) {
        if !self.contains(&label) {
            self.0.push(label);
        }
    }
}

impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|label| other.contains(label))
    }
}

impl Eq for LabelSet {}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut labels = Self::default();
        for label in iter {
            labels.insert(label.into());
        }
        labels
    }
}

/// The single swimlane edit decided for one issue event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwimlaneUpdate {
    /// Leave the dashboard untouched.
    NoOp,
    /// Add a swimlane.
    Create {
        /// Display name of the new swimlane.
        name: String,
        /// Filter the new swimlane uses.
        query: String,
    },
    /// Delete a swimlane.
    Remove {
        /// Identity of the swimlane, if one with `name` exists on the dashboard.
        id: Option<SwimlaneId>,
        /// Display name of the swimlane being removed.
        name: String,
    },
}

impl fmt::Display for SwimlaneUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOp => write!(f, "NOOP"),
            Self::Create { name, query } => write!(f, "CREATE {name:?} ({query})"),
            Self::Remove { id: Some(id), name } => write!(f, "REMOVE {name:?} (swimlane {id})"),
            Self::Remove { id: None, name } => write!(f, "REMOVE {name:?} (not on dashboard)"),
        }
    }
}
