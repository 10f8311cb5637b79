//! Live adapters for real external interactions.

pub mod tracker;

pub use tracker::{LiveTracker, Session};
