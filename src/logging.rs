//! Tracing subscriber setup.
//!
//! Logs always go to stderr so that stdout carries only command output.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default level. `RUST_LOG` takes precedence.
#[must_use]
pub fn default_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber.
///
/// A second call is a no-op, so tests and the binary can both call it.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbosity).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr);

    // Already initialized elsewhere.
    let _ = if json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_target(false).try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_level(0), LevelFilter::WARN);
        assert_eq!(default_level(1), LevelFilter::INFO);
        assert_eq!(default_level(2), LevelFilter::DEBUG);
        assert_eq!(default_level(9), LevelFilter::TRACE);
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(0, false);
        init(2, true);
    }
}
