//! Swimlane lookup by display name.

use crate::ports::tracker::{Swimlane, SwimlaneId};

/// Returns the identity of the first swimlane named exactly `name`.
///
/// `None` covers both "no such swimlane" and a matching swimlane that was
/// never assigned an identity.
#[must_use]
pub fn find_by_name(swimlanes: &[Swimlane], name: &str) -> Option<SwimlaneId> {
    swimlanes.iter().find(|lane| lane.name == name).and_then(|lane| lane.id)
}

/// Whether a swimlane named exactly `name` is on the dashboard.
#[must_use]
pub fn exists_by_name(swimlanes: &[Swimlane], name: &str) -> bool {
    swimlanes.iter().any(|lane| lane.name == name)
}
