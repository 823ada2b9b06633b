//! # Wireplan Domain
//!
//! Value types and records of the compile-time wiring resolver.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Qualified names, type descriptors, configuration |
//! | [`entities`] | Beans, sockets, modules, directives, the wiring graph |
//! | [`error`] | Domain error type |
//! | [`constants`] | Naming and well-known type constants |

pub mod constants;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    Bean, BeanFacts, BeanKind, BeanPredicate, Module, Mutator, NestedBean, Selector, Socket,
    Strategy, Visibility, WiringDirective, WiringGraph,
};
pub use error::{Error, Result};
pub use value_objects::{
    KnownTypes, NameKind, QualifiedName, ResolverConfig, TypeArgument, TypeDeclaration,
    TypeDescriptor,
};
