//! Team label to dashboard routing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LabelSet;
use crate::ports::tracker::DashboardId;

/// Team label routed to the recycling board out of the box.
pub const RECYCLING_TEAM_LABEL: &str = "recycling-nsk";

/// Dashboard owned by the recycling team.
pub const RECYCLING_TEAM_DASHBOARD: DashboardId = 351;

/// Maps team labels to the dashboard that owns their swimlanes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardRouter {
    routes: BTreeMap<String, DashboardId>,
}

impl DashboardRouter {
    /// Creates a router from explicit label to dashboard routes.
    #[must_use]
    pub fn new(routes: BTreeMap<String, DashboardId>) -> Self {
        Self { routes }
    }

    /// Adds or replaces the route for `label`.
    #[must_use]
    pub fn with_route(mut self, label: impl Into<String>, dashboard: DashboardId) -> Self {
        self.routes.insert(label.into(), dashboard);
        self
    }

    /// Returns the dashboard of the first team label found in `labels`.
    ///
    /// Labels are scanned in the order the tracker listed them, so with
    /// several routed teams the one listed first wins.
    #[must_use]
    pub fn resolve(&self, labels: &LabelSet) -> Option<DashboardId> {
        // TODO: react to the team label itself being added or removed; today
        // only the trigger label is reconsidered.
        labels.iter().find_map(|label| self.routes.get(label).copied())
    }

    /// Whether no routes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for DashboardRouter {
    fn default() -> Self {
        Self::new(BTreeMap::new()).with_route(RECYCLING_TEAM_LABEL, RECYCLING_TEAM_DASHBOARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes_recycling_team() {
        let router = DashboardRouter::default();
        let labels = LabelSet::from_iter(["bug", "recycling-nsk"]);
        assert_eq!(router.resolve(&labels), Some(351));
    }

    #[test]
    fn unknown_labels_resolve_to_none() {
        let router = DashboardRouter::default();
        assert_eq!(router.resolve(&LabelSet::from_iter(["bug"])), None);
        assert_eq!(router.resolve(&LabelSet::default()), None);
    }

    #[test]
    fn extra_teams_route_without_code_changes() {
        let router = DashboardRouter::new(BTreeMap::new()).with_route("media", 12);
        assert_eq!(router.resolve(&LabelSet::from_iter(["media", "x"])), Some(12));
        assert_eq!(router.resolve(&LabelSet::from_iter(["recycling-nsk"])), None);
    }

    #[test]
    fn first_listed_team_wins() {
        let router = DashboardRouter::default().with_route("media", 12);
        let recycling_first = LabelSet::split("bug,recycling-nsk,media", ",");
        assert_eq!(router.resolve(&recycling_first), Some(351));
        let media_first = LabelSet::split("media,recycling-nsk", ",");
        assert_eq!(router.resolve(&media_first), Some(12));
    }

    #[test]
    fn deserializes_from_plain_mapping() {
        let router: DashboardRouter = serde_yaml::from_str("media: 12\nops: 40\n").unwrap();
        assert_eq!(router.resolve(&LabelSet::from_iter(["ops"])), Some(40));
    }
}
