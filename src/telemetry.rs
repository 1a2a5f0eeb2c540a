//! Tracing subscriber setup for binaries.
//!
//! Logs go to stderr so stdout carries only the run's output.

use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_level`. Does nothing if a global subscriber is already set.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
