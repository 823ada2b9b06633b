//! Type descriptors
//!
//! A language-neutral model of the types beans expose and sockets require:
//! a nominal name with type arguments, array types, type variables (only
//! meaningful inside a [`TypeDeclaration`]'s supertypes) and unresolved types
//! produced by an incomplete compilation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Type of a bean or socket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TypeDescriptor {
    /// A nominal type, possibly parameterized
    Declared {
        /// Fully qualified nominal name
        name: String,
        /// Type arguments (empty for raw or non-generic types)
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeArgument>,
    },
    /// An array of the component type
    Array {
        /// Element type
        component: Box<TypeDescriptor>,
    },
    /// A type parameter of the enclosing declaration
    Variable {
        /// Parameter name
        name: String,
    },
    /// A type that could not be resolved (missing import or dependency)
    Unresolved {
        /// Name as written in the source
        name: String,
    },
}

/// Type argument of a parameterized type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "bound", content = "type")]
pub enum TypeArgument {
    /// `T`
    Exact(TypeDescriptor),
    /// `? extends T`
    Extends(TypeDescriptor),
    /// `? super T`
    Super(TypeDescriptor),
    /// `?`
    Unbounded,
}

impl TypeDescriptor {
    /// A non-generic declared type
    pub fn named(name: impl Into<String>) -> Self {
        Self::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized declared type
    pub fn generic(name: impl Into<String>, args: Vec<TypeArgument>) -> Self {
        Self::Declared {
            name: name.into(),
            args,
        }
    }

    /// An array of `component`
    pub fn array_of(component: TypeDescriptor) -> Self {
        Self::Array {
            component: Box::new(component),
        }
    }

    /// A type variable
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    /// An unresolved type
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::Unresolved { name: name.into() }
    }

    /// Nominal name of a declared type
    pub fn nominal_name(&self) -> Option<&str> {
        match self {
            Self::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type arguments of a declared type
    pub fn type_args(&self) -> &[TypeArgument] {
        match self {
            Self::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// The type with all type arguments removed
    pub fn erasure(&self) -> TypeDescriptor {
        match self {
            Self::Declared { name, .. } => Self::named(name.clone()),
            Self::Array { component } => Self::array_of(component.erasure()),
            other => other.clone(),
        }
    }

    /// Whether this type, or any type nested in it, is unresolved
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::Unresolved { .. } => true,
            Self::Array { component } => component.is_malformed(),
            Self::Declared { args, .. } => args.iter().any(TypeArgument::is_malformed),
            Self::Variable { .. } => false,
        }
    }

    /// Replace type variables using `bindings`; unbound variables are kept
    pub fn substitute(&self, bindings: &HashMap<String, TypeArgument>) -> TypeArgument {
        match self {
            Self::Variable { name } => bindings
                .get(name)
                .cloned()
                .unwrap_or_else(|| TypeArgument::Exact(self.clone())),
            Self::Declared { name, args } => TypeArgument::Exact(Self::Declared {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            }),
            Self::Array { component } => match component.substitute(bindings) {
                TypeArgument::Exact(component) => TypeArgument::Exact(Self::array_of(component)),
                _ => TypeArgument::Exact(self.clone()),
            },
            Self::Unresolved { .. } => TypeArgument::Exact(self.clone()),
        }
    }
}

impl TypeArgument {
    /// Whether the argument's bound is unresolved
    pub fn is_malformed(&self) -> bool {
        self.bound().is_some_and(TypeDescriptor::is_malformed)
    }

    /// The bounding type, if any
    pub fn bound(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Exact(t) | Self::Extends(t) | Self::Super(t) => Some(t),
            Self::Unbounded => None,
        }
    }

    fn substitute(&self, bindings: &HashMap<String, TypeArgument>) -> TypeArgument {
        match self {
            Self::Exact(t) => t.substitute(bindings),
            // A wildcard bound that resolves to another wildcard keeps the outer bound kind
            Self::Extends(t) => match t.substitute(bindings) {
                TypeArgument::Exact(inner) | TypeArgument::Extends(inner) => Self::Extends(inner),
                _ => Self::Unbounded,
            },
            Self::Super(t) => match t.substitute(bindings) {
                TypeArgument::Exact(inner) | TypeArgument::Super(inner) => Self::Super(inner),
                _ => Self::Unbounded,
            },
            Self::Unbounded => Self::Unbounded,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", rendered.join(", "))?;
                }
                Ok(())
            }
            Self::Array { component } => write!(f, "{component}[]"),
            Self::Variable { name } => write!(f, "{name}"),
            Self::Unresolved { name } => write!(f, "<unresolved {name}>"),
        }
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(t) => write!(f, "{t}"),
            Self::Extends(t) => write!(f, "? extends {t}"),
            Self::Super(t) => write!(f, "? super {t}"),
            Self::Unbounded => write!(f, "?"),
        }
    }
}

/// Declaration of a nominal type and its direct supertypes
///
/// Supertypes may reference `parameters` through [`TypeDescriptor::Variable`],
/// e.g. `ArrayList<E>` declares `List<E>` as a supertype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Fully qualified nominal name
    pub name: String,
    /// Type parameter names, in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Direct supertypes (superclass and implemented interfaces)
    #[serde(default)]
    pub supertypes: Vec<TypeDescriptor>,
}

impl TypeDeclaration {
    /// A declaration without type parameters or supertypes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    /// Add type parameters
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(parameters.into_iter().map(Into::into));
        self
    }

    /// Add a direct supertype
    pub fn extends(mut self, supertype: TypeDescriptor) -> Self {
        self.supertypes.push(supertype);
        self
    }
}
