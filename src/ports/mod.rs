//! Port traits defining external boundaries.
//!
//! The only boundary today is the issue tracker. Implementations live in
//! `src/adapters/`.

pub mod tracker;

pub use tracker::{
    ChangelogEntry, DashboardId, Field, Issue, Swimlane, SwimlaneId, TrackerClient, TrackerError,
    TrackerFuture,
};
