//! Logging initialization
//!
//! `tracing` events go to stderr through the fmt layer. The filter comes
//! from `RUST_LOG` and defaults to `info`. Records emitted through the `log`
//! facade by dependencies (reqwest, teloxide) are bridged into tracing.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Default filter when RUST_LOG is not set
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the global subscriber.
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - A global logger was already installed
pub fn init_logger() -> Result<()> {
    init_logger_with(None)
}

/// Same as [`init_logger`], with an explicit filter overriding RUST_LOG.
pub fn init_logger_with(filter: Option<&str>) -> Result<()> {
    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_log::LogTracer::init().map_err(|e| anyhow::anyhow!("Failed to bridge log records: {}", e))?;

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}
