//! Logging setup
//!
//! Logs go to stderr so the output of the launched command stays clean.
//! `RUST_LOG` takes precedence; otherwise `--debug` selects the level.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is not set. Only our own events pass;
/// the HTTP stack stays quiet even with `--debug`.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "wfor=debug"
    } else {
        "wfor=info"
    }
}

/// Install the global subscriber. Call once, before any polling starts.
pub fn init(debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
