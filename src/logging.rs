//! Tracing subscriber initialization.
//!
//! Logs go to stderr so results on stdout stay machine-readable.
//! Respects `RUST_LOG`; defaults to `warn`.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize tracing subscriber: {e}"))
}
