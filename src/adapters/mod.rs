//! Implementations of the port traits.
//!
//! `live` talks to the real tracker, `recording` wraps another adapter and
//! captures its traffic to a cassette, and `replaying` serves a cassette back.

pub mod live;
pub mod recording;
pub mod replaying;
