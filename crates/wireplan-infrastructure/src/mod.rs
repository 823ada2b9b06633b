//! # Infrastructure Layer
//!
//! Technical concerns around the resolver: where configuration and wiring
//! graphs come from, and where log output goes.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered configuration (defaults, TOML file, environment) |
//! | [`graph`] | Wiring graph documents in JSON or TOML |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`constants`] | File names, environment prefixes, defaults |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod graph;
pub mod logging;

pub use config::{AppConfig, LoggingConfig};
pub use error_ext::ErrorContext;
pub use graph::{GraphFormat, GraphLoader};
