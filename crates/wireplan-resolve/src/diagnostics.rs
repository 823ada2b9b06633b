//! Wiring diagnostics
//!
//! Every problem the resolver finds, and the thread-safe collector they are
//! accumulated in. Resolution never stops at the first problem: each pass
//! reports everything it finds and the caller decides from
//! [`Diagnostics::has_errors`] whether the plan may be used.

use crate::diagnostic::Diagnostic;
use crate::Severity;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};
use wireplan_domain::QualifiedName;

define_diagnostics! {
    pub enum WiringDiagnostic {
        #[diagnostic(
            id = "WIRE001",
            category = Resolution,
            severity = Error,
            message = "Missing required dependency {element}: no visible bean of type {required_type}",
            suggestion = "Declare or import a public bean of the required type, or make the socket optional"
        )]
        MissingRequiredDependency {
            element: QualifiedName,
            required_type: String,
        },

        #[diagnostic(
            id = "WIRE002",
            category = Resolution,
            severity = Error,
            message = "Ambiguous dependency {element}: candidates {candidates}",
            suggestion = "Add a wiring directive naming the bean to use, or a selector narrowing the candidates"
        )]
        AmbiguousDependency {
            element: QualifiedName,
            candidates: String,
        },

        #[diagnostic(
            id = "WIRE003",
            category = Directive,
            severity = Error,
            message = "Invalid wiring directive into {element}: bean {bean} {reason}"
        )]
        UnknownDirectiveBean {
            element: QualifiedName,
            bean: QualifiedName,
            reason: String,
        },

        #[diagnostic(
            id = "WIRE004",
            category = Directive,
            severity = Error,
            message = "Invalid wiring directive in module {module}: socket {element} is not resolved in this module",
            suggestion = "Target a socket of this module's beans, or a socket bean of a directly imported module"
        )]
        UnknownDirectiveSocket {
            element: QualifiedName,
            module: QualifiedName,
        },

        #[diagnostic(
            id = "WIRE005",
            category = Directive,
            severity = Error,
            message = "Invalid wiring directive into {element}: bean {bean} of type {bean_type} is not assignable to {required_type}"
        )]
        IncompatibleDirectiveBean {
            element: QualifiedName,
            bean: QualifiedName,
            bean_type: String,
            required_type: String,
        },

        #[diagnostic(
            id = "WIRE006",
            category = Cycle,
            severity = Error,
            message = "Dependency cycle starting at {element}: {chain}",
            suggestion = "Break the cycle by removing one of the injections or restructuring the beans"
        )]
        DependencyCycle {
            element: QualifiedName,
            chain: String,
        },

        #[diagnostic(
            id = "WIRE007",
            category = Type,
            severity = Warning,
            message = "Unresolved type {type_name} on {element}; a dependency may be missing"
        )]
        UnresolvedType {
            element: QualifiedName,
            type_name: String,
        },

        #[diagnostic(
            id = "WIRE008",
            category = Declaration,
            severity = Error,
            message = "Duplicate {kind} name {element}; the first declaration is kept"
        )]
        DuplicateName {
            element: QualifiedName,
            kind: String,
        },

        #[diagnostic(
            id = "WIRE009",
            category = Declaration,
            severity = Error,
            message = "Invalid declaration {element}: {reason}"
        )]
        InvalidDeclaration {
            element: QualifiedName,
            reason: String,
        },

        #[diagnostic(
            id = "WIRE010",
            category = Directive,
            severity = Warning,
            message = "Bean {bean} is wired into {element} more than once; later occurrences are ignored"
        )]
        DuplicateDirectiveBean {
            element: QualifiedName,
            bean: QualifiedName,
        },

        #[diagnostic(
            id = "WIRE011",
            category = Declaration,
            severity = Error,
            message = "Module {element} imports unknown module {import}"
        )]
        UnknownImport {
            element: QualifiedName,
            import: QualifiedName,
        },

        #[diagnostic(
            id = "WIRE012",
            category = Declaration,
            severity = Error,
            message = "Module {element} cannot be resolved: import cycle among {modules}"
        )]
        ImportCycle {
            element: QualifiedName,
            modules: String,
        },

        #[diagnostic(
            id = "WIRE013",
            category = Resolution,
            severity = Warning,
            message = "Socket {element} of a root module must be supplied at runtime"
        )]
        UnsuppliedRootSocket {
            element: QualifiedName,
        },

        #[diagnostic(
            id = "WIRE014",
            category = Resolution,
            severity = Error,
            message = "Socket {element} is imported by several modules ({importers}); only one may supply it"
        )]
        SharedModuleSocket {
            element: QualifiedName,
            importers: String,
        },
    }
}

/// Render a list of names as `[a, b, c]`
pub(crate) fn join_names<'a>(names: impl IntoIterator<Item = &'a QualifiedName>) -> String {
    let rendered: Vec<&str> = names.into_iter().map(QualifiedName::as_str).collect();
    format!("[{}]", rendered.join(", "))
}

/// Append-only, thread-safe diagnostics collector
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<WiringDiagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic
    pub fn report(&self, diagnostic: WiringDiagnostic) {
        match diagnostic.severity() {
            Severity::Warning => warn!(id = diagnostic.id(), "{diagnostic}"),
            Severity::Error => debug!(id = diagnostic.id(), "{diagnostic}"),
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }

    /// Record several diagnostics
    pub fn extend(&self, diagnostics: impl IntoIterator<Item = WiringDiagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    /// Whether any error-level diagnostic was recorded
    pub fn has_errors(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(Diagnostic::is_error)
    }

    /// Number of (errors, warnings)
    pub fn counts(&self) -> (usize, usize) {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let errors = entries.iter().filter(|d| d.is_error()).count();
        (errors, entries.len() - errors)
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deduplicated diagnostics ordered by element, id and message
    pub fn snapshot(&self) -> Vec<WiringDiagnostic> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        entries.sort_by(|a, b| {
            a.element()
                .cmp(b.element())
                .then_with(|| a.id().cmp(b.id()))
                .then_with(|| a.message().cmp(&b.message()))
        });
        entries.dedup();
        entries
    }

    /// Consume the collector, returning the ordered diagnostics
    pub fn into_sorted(self) -> Vec<WiringDiagnostic> {
        self.snapshot()
    }
}
