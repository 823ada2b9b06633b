//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `wireplan_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wireplan.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wireplan";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "WIREPLAN";

/// Separator between nested keys in environment variables
/// (`WIREPLAN_RESOLVER__PARALLEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "WIREPLAN_LOG";
