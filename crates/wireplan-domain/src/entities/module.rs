//! Modules and wiring directives

use super::bean::Bean;
use crate::value_objects::QualifiedName;
use serde::{Deserialize, Serialize};

/// Explicit author intent: wire these beans, in this order, into that socket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringDirective {
    /// Beans to inject, in author order
    pub beans: Vec<QualifiedName>,
    /// Target socket
    pub into: QualifiedName,
}

impl WiringDirective {
    pub fn new(beans: Vec<QualifiedName>, into: QualifiedName) -> Self {
        Self { beans, into }
    }
}

/// A named collection of beans and directives, importing other modules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Module name (a module-kind qualified name)
    pub name: QualifiedName,
    /// Declared beans, module beans and socket beans alike
    #[serde(default)]
    pub beans: Vec<Bean>,
    /// Explicit wiring overrides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<WiringDirective>,
    /// Modules whose public beans are visible here
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<QualifiedName>,
}

impl Module {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            beans: Vec::new(),
            directives: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn with_bean(mut self, bean: Bean) -> Self {
        self.beans.push(bean);
        self
    }

    pub fn with_directive(mut self, directive: WiringDirective) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn with_import(mut self, module: QualifiedName) -> Self {
        self.imports.push(module);
        self
    }

    /// Socket beans declared by this module
    pub fn socket_beans(&self) -> impl Iterator<Item = &Bean> {
        self.beans.iter().filter(|bean| bean.is_socket_bean())
    }
}
