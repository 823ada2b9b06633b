//! Diagnostic Trait
//!
//! Generic trait for everything the resolver reports. Every diagnostic is
//! attached to the most specific element it concerns: a socket, a bean or
//! a module.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use wireplan_domain::QualifiedName;

// Re-export Severity from parent module for convenience
pub use super::Severity;

/// Category of diagnostic for grouping in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    /// Socket cardinality reconciliation (missing, ambiguous)
    Resolution,
    /// Explicit wiring directives
    Directive,
    /// Dependency cycles among resolved assignments
    Cycle,
    /// Unresolved or malformed types
    Type,
    /// Structural problems in the declarations themselves
    Declaration,
}

impl Display for DiagnosticCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolution => write!(f, "Resolution"),
            Self::Directive => write!(f, "Directive"),
            Self::Cycle => write!(f, "Cycle"),
            Self::Type => write!(f, "Type"),
            Self::Declaration => write!(f, "Declaration"),
        }
    }
}

/// Generic diagnostic trait - all resolver findings implement this
pub trait Diagnostic: Display + Send + Sync {
    /// Unique diagnostic ID (e.g., "WIRE001")
    fn id(&self) -> &str;

    /// Category for grouping in reports
    fn category(&self) -> DiagnosticCategory;

    /// Severity level
    fn severity(&self) -> Severity;

    /// Element the diagnostic is attached to
    fn element(&self) -> &QualifiedName;

    /// Human-readable message describing the problem
    fn message(&self) -> String {
        self.to_string()
    }

    /// Suggested fix (if applicable)
    fn suggestion(&self) -> Option<String> {
        None
    }

    fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}
