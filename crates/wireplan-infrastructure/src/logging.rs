//! Structured logging with tracing
//!
//! Log output goes to stderr so that reports printed on stdout stay
//! machine-readable.

use crate::config::LoggingConfig;
use crate::constants::LOG_FILTER_ENV;
use crate::error_ext::ErrorContext;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wireplan_domain::error::{Error, Result};

/// Initialize logging with the provided configuration
///
/// `WIREPLAN_LOG` overrides the configured level with a full filter
/// directive (e.g. `wireplan_resolve=trace`). Fails when a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| level_filter(level));

    // Layer types differ between formats
    if config.json_format {
        let stderr = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true);
        Registry::default()
            .with(filter)
            .with(stderr)
            .try_init()
            .context("Failed to install log subscriber")?;
    } else {
        let stderr = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);
        Registry::default()
            .with(filter)
            .with(stderr)
            .try_init()
            .context("Failed to install log subscriber")?;
    }

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Filter admitting events at `level` and above
///
/// Built from the parsed level so aliases such as `warning` behave like
/// their canonical names.
pub fn level_filter(level: Level) -> EnvFilter {
    EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
}

/// Log the configuration file in use
pub fn log_config_loaded(config_path: &Path) {
    info!("Configuration loaded from {}", config_path.display());
}

/// Log a wiring graph document being read
pub fn log_graph_loaded(graph_path: &Path, modules: usize, types: usize) {
    debug!(modules, types, "Wiring graph loaded from {}", graph_path.display());
}
