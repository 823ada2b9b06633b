//! Socket selectors
//!
//! Selectors narrow the candidate beans of a socket beyond type
//! compatibility. The resolver treats them as opaque predicates: a bean
//! must satisfy every selector attached to a socket.

use crate::value_objects::{QualifiedName, TypeDescriptor};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What a selector gets to see of a candidate bean
#[derive(Debug, Clone, Copy)]
pub struct BeanFacts<'a> {
    /// Candidate qualified name
    pub name: &'a QualifiedName,
    /// Candidate exposed type
    pub exposed_type: &'a TypeDescriptor,
    /// Markers carried by the candidate's declaration
    pub annotations: &'a [String],
}

/// User-supplied selector predicate
pub trait BeanPredicate: fmt::Debug + Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Whether the candidate passes
    fn matches(&self, bean: &BeanFacts<'_>) -> bool;
}

/// A named predicate over candidate beans
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "selector")]
pub enum Selector {
    /// The candidate must carry the given marker
    Annotated {
        /// Marker name
        annotation: String,
    },
    /// The candidate's qualified name must match the regular expression
    NameMatches {
        /// Regular expression, unanchored
        pattern: String,
    },
    /// Arbitrary predicate supplied programmatically
    #[serde(skip)]
    Custom(Arc<dyn BeanPredicate>),
}

impl Selector {
    /// Selector requiring a marker
    pub fn annotated(annotation: impl Into<String>) -> Self {
        Self::Annotated {
            annotation: annotation.into(),
        }
    }

    /// Selector requiring a name pattern
    pub fn name_matches(pattern: impl Into<String>) -> Self {
        Self::NameMatches {
            pattern: pattern.into(),
        }
    }

    /// Selector backed by a custom predicate
    pub fn custom(predicate: impl BeanPredicate + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Prepare the selector for repeated evaluation
    pub fn compile(&self) -> Result<CompiledSelector, regex::Error> {
        Ok(match self {
            Self::Annotated { annotation } => CompiledSelector::Annotated(annotation.clone()),
            Self::NameMatches { pattern } => CompiledSelector::Name(Regex::new(pattern)?),
            Self::Custom(predicate) => CompiledSelector::Custom(Arc::clone(predicate)),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annotated { annotation } => write!(f, "@{annotation}"),
            Self::NameMatches { pattern } => write!(f, "name ~ /{pattern}/"),
            Self::Custom(predicate) => write!(f, "{}", predicate.name()),
        }
    }
}

/// A selector ready to be evaluated
#[derive(Debug, Clone)]
pub enum CompiledSelector {
    /// Marker check
    Annotated(String),
    /// Name pattern check
    Name(Regex),
    /// Custom predicate
    Custom(Arc<dyn BeanPredicate>),
}

impl CompiledSelector {
    /// Whether the candidate passes
    pub fn matches(&self, bean: &BeanFacts<'_>) -> bool {
        match self {
            Self::Annotated(annotation) => bean.annotations.iter().any(|a| a == annotation),
            Self::Name(pattern) => pattern.is_match(bean.name.as_str()),
            Self::Custom(predicate) => predicate.matches(bean),
        }
    }
}
