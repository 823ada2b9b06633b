//! Domain Value Objects
//!
//! Immutable values the wiring model is built from.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`QualifiedName`] | `module[:bean[:socket]]` identifier |
//! | [`TypeDescriptor`] | Exposed or required type of a bean or socket |
//! | [`TypeDeclaration`] | Nominal type with its direct supertypes |
//! | [`ResolverConfig`] | Resolver behaviour switches |

/// Resolver configuration value objects
pub mod config;
/// Qualified names of modules, beans and sockets
pub mod name;
/// Type descriptors and declarations
pub mod types;

pub use config::{KnownTypes, ResolverConfig};
pub use name::{NameKind, QualifiedName};
pub use types::{TypeArgument, TypeDeclaration, TypeDescriptor};
