//! Tracing subscriber setup for the `credvault` binary.
//!
//! The library only emits events through `tracing`; installing a
//! subscriber is left to whoever embeds it.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive (e.g. `credvault=debug`).
pub const LOG_ENV: &str = "CREDVAULT_LOG";

/// Install a stderr `fmt` subscriber filtered by `CREDVAULT_LOG`
/// (default: `warn`).  Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
