//! # Wireplan
//!
//! Compile-time dependency-injection wiring resolver.
//!
//! A front-end describes the modules of a compilation unit (beans, sockets,
//! imports, wiring directives) and the type hierarchy they use. Wireplan
//! decides which bean satisfies every socket and reports every problem
//! before any code is generated.
//!
//! ## Example
//!
//! ```ignore
//! use wireplan::{ResolverConfig, WiringGraph, WiringResolver, Reporter};
//!
//! let graph = WiringGraph::from_json(&document)?;
//! let report = WiringResolver::new(ResolverConfig::default()).resolve(&graph);
//! if report.has_errors() {
//!     eprintln!("{}", Reporter::to_human_readable(&report));
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - names, types, bean/socket records, configuration values
//! - `resolve` - matching, directives, scheduling, cycle detection, reports
//! - `infrastructure` - configuration loading, logging, graph documents
//! - `cli` - the `wireplan` command

pub mod cli;

/// Domain layer - names, types and records
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wireplan_domain::*;
}

/// Resolution engine
///
/// Re-exports from the resolve crate for convenience
pub mod resolve {
    pub use wireplan_resolve::*;
}

/// Infrastructure layer - config, logging and graph loading
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wireplan_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the resolver entry points
pub use resolve::{Reporter, ResolutionReport, WiringResolver};
