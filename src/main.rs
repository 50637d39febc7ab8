//! usage-config-check: validate the collector configuration before startup
//!
//! Exits successfully only when the configuration at the well-known path
//! loads and validates; the summary is printed on stderr.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use usage_collector_config::{load_config, DEFAULT_CONFIG_PATH};

fn init_tracing() {
    // RUST_LOG directives are layered under a WARN default.
    let filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()
        .with_context(|| format!("Refusing to start with the config at {}", DEFAULT_CONFIG_PATH))?;
    tracing::debug!(interval = ?config.collector().interval(), "Collector schedule");
    Ok(())
}
