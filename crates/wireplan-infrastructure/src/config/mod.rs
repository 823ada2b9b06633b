//! Application configuration
//!
//! Resolver switches come from the domain crate; this module adds the
//! logging section and the loader that layers every source together.

pub mod loader;

use crate::constants::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use wireplan_domain::ResolverConfig;

pub use loader::{ConfigBuilder, ConfigLoader};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}

/// Complete configuration of a wireplan run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}
