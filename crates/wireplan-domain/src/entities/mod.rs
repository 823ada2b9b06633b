//! Domain Entities
//!
//! Records produced by a front-end and consumed read-only by the resolver.
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`Bean`] | Module bean or socket bean, with nested beans |
//! | [`Socket`] | Injection point with selectors and an optional mutator |
//! | [`Module`] | Beans, directives and imports |
//! | [`WiringDirective`] | Explicit bean-to-socket assignment |
//! | [`WiringGraph`] | Every module and type of a compilation unit |

pub mod bean;
pub mod graph;
pub mod module;
pub mod selector;
pub mod socket;

pub use bean::{Bean, BeanKind, NestedBean, Strategy, Visibility};
pub use graph::WiringGraph;
pub use module::{Module, WiringDirective};
pub use selector::{BeanFacts, BeanPredicate, CompiledSelector, Selector};
pub use socket::{Mutator, Socket};
