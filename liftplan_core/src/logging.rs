//! Logging setup for the liftplan binary.
//!
//! The library itself only emits `tracing` events. Nothing is printed until
//! a binary installs a subscriber through one of these functions.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used by `--verbose`: engine and CLI debug events, warnings elsewhere
const VERBOSE_FILTER: &str = "warn,liftplan_core=debug,liftplan=debug";

/// Install the stderr subscriber for a CLI run.
///
/// Quiet runs only show warnings. `RUST_LOG` always wins when set.
pub fn init(verbose: bool) {
    if verbose {
        init_with_level(VERBOSE_FILTER)
    } else {
        init_with_level("warn")
    }
}

/// Install the stderr subscriber with an explicit default filter
/// (e.g. `"debug"` or `"warn,liftplan_core=trace"`).
pub fn init_with_level(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries the plan itself
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Capture engine events in test output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("liftplan_core=trace"))
        .try_init();
}
