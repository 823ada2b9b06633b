//! Shared test utilities for wireplan-resolve tests
//!
//! Fixture builders for wiring graphs and shortcuts for inspecting reports.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use wireplan_domain::{
    Bean, Module, QualifiedName, ResolverConfig, Socket, TypeArgument, TypeDescriptor,
    WiringDirective, WiringGraph,
};
use wireplan_resolve::{ResolutionOutcome, ResolutionReport, WiringResolver};

pub const LIST: &str = "java.util.List";
pub const SET: &str = "java.util.Set";
pub const COLLECTION: &str = "java.util.Collection";

/// Parse a qualified name
pub fn qn(name: &str) -> QualifiedName {
    name.parse().unwrap()
}

/// A non-generic declared type
pub fn ty(name: &str) -> TypeDescriptor {
    TypeDescriptor::named(name)
}

/// `container<element>`
pub fn generic(container: &str, element: &str) -> TypeDescriptor {
    TypeDescriptor::generic(container, vec![TypeArgument::Exact(ty(element))])
}

/// `java.util.List<element>`
pub fn list_of(element: &str) -> TypeDescriptor {
    generic(LIST, element)
}

/// A module bean exposing `exposed` with the given sockets
pub fn bean(name: &str, exposed: &str, sockets: Vec<Socket>) -> Bean {
    sockets
        .into_iter()
        .fold(Bean::module_bean(name, ty(exposed)), Bean::with_socket)
}

/// A module bean without sockets
pub fn leaf(name: &str, exposed: &str) -> Bean {
    Bean::module_bean(name, ty(exposed))
}

/// A module with the given beans
pub fn module(name: &str, beans: Vec<Bean>) -> Module {
    beans.into_iter().fold(Module::new(qn(name)), Module::with_bean)
}

/// A directive wiring `beans` into `socket`
pub fn directive(beans: &[&str], socket: &str) -> WiringDirective {
    WiringDirective::new(beans.iter().map(|name| qn(name)).collect(), qn(socket))
}

/// A graph of the given modules without type declarations
pub fn graph(modules: Vec<Module>) -> WiringGraph {
    modules.into_iter().fold(WiringGraph::new(), WiringGraph::with_module)
}

/// Default configuration, resolved on the calling thread
pub fn sequential() -> ResolverConfig {
    ResolverConfig {
        parallel: false,
        ..ResolverConfig::default()
    }
}

/// Resolve with the default configuration
pub fn resolve(graph: &WiringGraph) -> ResolutionReport {
    WiringResolver::new(ResolverConfig::default()).resolve(graph)
}

/// Resolve with a custom configuration
pub fn resolve_with(graph: &WiringGraph, config: ResolverConfig) -> ResolutionReport {
    WiringResolver::new(config).resolve(graph)
}

/// Outcome of a socket, panicking when it was not planned
pub fn outcome<'a>(report: &'a ResolutionReport, socket: &str) -> &'a ResolutionOutcome {
    report
        .plan
        .outcome(&qn(socket))
        .unwrap_or_else(|| panic!("Expected socket {socket} in the plan"))
}

/// Diagnostic ids in report order
pub fn diagnostic_ids(report: &ResolutionReport) -> Vec<&str> {
    report.diagnostics.iter().map(|d| d.id.as_str()).collect()
}

/// Number of diagnostics with `id`
pub fn count_id(report: &ResolutionReport, id: &str) -> usize {
    report.diagnostics_with_id(id).count()
}

/// Names as strings, for compact assertions
pub fn names(names: &[QualifiedName]) -> Vec<&str> {
    names.iter().map(QualifiedName::as_str).collect()
}
