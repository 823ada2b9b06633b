//! Wiring Directive Store
//!
//! Explicit author overrides grouped by target socket. Several directives
//! may name the same socket; their beans are concatenated in the order the
//! directives were written.

use crate::diagnostics::{Diagnostics, WiringDiagnostic};
use indexmap::{IndexMap, IndexSet};
use wireplan_domain::{QualifiedName, WiringDirective};

/// Directive beans keyed by target socket
#[derive(Debug, Clone, Default)]
pub struct DirectiveStore {
    by_socket: IndexMap<QualifiedName, IndexSet<QualifiedName>>,
}

impl DirectiveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group `directives` by target socket
    ///
    /// A bean named twice for the same socket is kept once, at its first
    /// position, and reported as a warning.
    pub fn from_directives<'a>(
        directives: impl IntoIterator<Item = &'a WiringDirective>,
        diagnostics: &Diagnostics,
    ) -> Self {
        let mut store = Self::new();
        for directive in directives {
            store.add(directive, diagnostics);
        }
        store
    }

    /// Record one directive
    pub fn add(&mut self, directive: &WiringDirective, diagnostics: &Diagnostics) {
        let beans = self.by_socket.entry(directive.into.clone()).or_default();
        for bean in &directive.beans {
            if !beans.insert(bean.clone()) {
                diagnostics.report(WiringDiagnostic::DuplicateDirectiveBean {
                    element: directive.into.clone(),
                    bean: bean.clone(),
                });
            }
        }
    }

    /// Beans wired into `socket`, in author order
    pub fn beans_for(&self, socket: &QualifiedName) -> Option<impl Iterator<Item = &QualifiedName>> {
        self.by_socket.get(socket).map(IndexSet::iter)
    }

    /// Whether any directive names `socket`
    pub fn targets_socket(&self, socket: &QualifiedName) -> bool {
        self.by_socket.contains_key(socket)
    }

    /// Every targeted socket, in first-mention order
    pub fn targets(&self) -> impl Iterator<Item = &QualifiedName> {
        self.by_socket.keys()
    }

    pub fn len(&self) -> usize {
        self.by_socket.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_socket.is_empty()
    }
}
