//! Sockets
//!
//! A socket is an injection point requiring one or more beans of a type.
//! Whether a socket accepts one bean or many is derived from its required
//! type by the type matcher, never stored twice.

use super::selector::Selector;
use crate::value_objects::TypeDescriptor;
use serde::{Deserialize, Serialize};

/// Transformation applied to the bean resolved into a single socket
///
/// The socket is matched against `input`; the value handed to the receiving
/// bean has type `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutator {
    /// Type the mutator accepts
    pub input: TypeDescriptor,
    /// Type the mutator produces
    pub output: TypeDescriptor,
    /// A required mutator makes its socket mandatory
    #[serde(default)]
    pub required: bool,
}

/// An injection point of a bean, or a module-level socket bean
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socket {
    /// Simple socket name (a single identifier)
    pub name: String,
    /// Type the socket requires
    pub required_type: TypeDescriptor,
    /// Whether the socket may stay unresolved
    #[serde(default)]
    pub optional: bool,
    /// Predicates every candidate must satisfy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<Selector>,
    /// Optional transformation of the resolved value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutator: Option<Mutator>,
}

impl Socket {
    /// A required socket without selectors
    pub fn required(name: impl Into<String>, required_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            required_type,
            optional: false,
            selectors: Vec::new(),
            mutator: None,
        }
    }

    /// An optional socket without selectors
    pub fn optional(name: impl Into<String>, required_type: TypeDescriptor) -> Self {
        Self {
            optional: true,
            ..Self::required(name, required_type)
        }
    }

    /// Attach a selector
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selectors.push(selector);
        self
    }

    /// Attach a mutator
    pub fn with_mutator(mut self, mutator: Mutator) -> Self {
        self.mutator = Some(mutator);
        self
    }

    /// Whether the socket must resolve to at least one bean
    pub fn is_mandatory(&self) -> bool {
        !self.optional || self.mutator.as_ref().is_some_and(|m| m.required)
    }

    /// Type candidates are matched against: the mutator input when present
    pub fn matched_type(&self) -> &TypeDescriptor {
        self.mutator
            .as_ref()
            .map_or(&self.required_type, |m| &m.input)
    }

    /// Type of the value finally injected: the mutator output when present
    pub fn provided_type(&self) -> &TypeDescriptor {
        self.mutator
            .as_ref()
            .map_or(&self.required_type, |m| &m.output)
    }
}
