//! Binary entrypoint for the `swimlane-sync` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Record/replay is handled in commands::dispatch via SWIMLANE_RECORD / SWIMLANE_REPLAY.
    match swimlane_sync::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
