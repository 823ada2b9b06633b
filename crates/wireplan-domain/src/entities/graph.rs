//! Wiring graph document
//!
//! The complete input of one resolution run: the type hierarchy plus every
//! module of the compilation unit, as produced by a front-end.

use super::module::Module;
use crate::error::Result;
use crate::value_objects::{QualifiedName, TypeDeclaration};
use serde::{Deserialize, Serialize};

/// Type declarations and modules of one compilation unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WiringGraph {
    /// Nominal types and their supertypes
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    /// Modules, in any order
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl WiringGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, declaration: TypeDeclaration) -> Self {
        self.types.push(declaration);
        self
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Look a module up by name
    pub fn module(&self, name: &QualifiedName) -> Option<&Module> {
        self.modules.iter().find(|module| &module.name == name)
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
