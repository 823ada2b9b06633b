//! Type Compatibility Matcher
//!
//! Decides whether a candidate bean's exposed type satisfies a socket's
//! required type. Assignability is nominal and covariant: a candidate
//! matches when its type, or any supertype reachable through the
//! [`TypeHierarchy`], has the required name and compatible type arguments.
//!
//! Multiplicity is derived from the socket type only: arrays and the three
//! well-known containers (compared by erased name, not by subtyping) make a
//! multi-socket whose candidates are matched against the component type.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use wireplan_domain::{KnownTypes, TypeArgument, TypeDeclaration, TypeDescriptor};

/// Guards against runaway expansion of recursive generic declarations
const MAX_HIERARCHY_DEPTH: usize = 64;

/// How many beans a socket accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    Single,
    Array,
    List,
    Set,
    Collection,
}

impl Multiplicity {
    /// Whether every compatible candidate is accepted
    pub fn is_multi(self) -> bool {
        self != Self::Single
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Array => write!(f, "array"),
            Self::List => write!(f, "list"),
            Self::Set => write!(f, "set"),
            Self::Collection => write!(f, "collection"),
        }
    }
}

/// Verdict of a compatibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    Compatible,
    Incompatible,
    /// One of the types is unresolved; neither a match nor a failure
    Indeterminate,
}

impl Compatibility {
    fn from_bool(compatible: bool) -> Self {
        if compatible {
            Self::Compatible
        } else {
            Self::Incompatible
        }
    }
}

/// Nominal type declarations indexed by name
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    declarations: HashMap<String, TypeDeclaration>,
}

impl TypeHierarchy {
    /// Index declarations; a later declaration of the same name replaces an earlier one
    pub fn from_declarations<'a>(declarations: impl IntoIterator<Item = &'a TypeDeclaration>) -> Self {
        Self {
            declarations: declarations
                .into_iter()
                .map(|declaration| (declaration.name.clone(), declaration.clone()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.get(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Compatibility checks over one type hierarchy
#[derive(Debug, Clone)]
pub struct TypeMatcher {
    hierarchy: TypeHierarchy,
    known: KnownTypes,
}

impl TypeMatcher {
    pub fn new(hierarchy: TypeHierarchy, known: KnownTypes) -> Self {
        Self { hierarchy, known }
    }

    pub fn known_types(&self) -> &KnownTypes {
        &self.known
    }

    /// Multiplicity of a socket requiring `required`
    pub fn multiplicity(&self, required: &TypeDescriptor) -> Multiplicity {
        match required {
            TypeDescriptor::Array { .. } => Multiplicity::Array,
            TypeDescriptor::Declared { name, .. } if *name == self.known.list => Multiplicity::List,
            TypeDescriptor::Declared { name, .. } if *name == self.known.set => Multiplicity::Set,
            TypeDescriptor::Declared { name, .. } if *name == self.known.collection => {
                Multiplicity::Collection
            }
            _ => Multiplicity::Single,
        }
    }

    /// Type each candidate of a socket requiring `required` is matched against
    ///
    /// A container without a type argument accepts any bean.
    pub fn component_type(&self, required: &TypeDescriptor) -> TypeArgument {
        match (self.multiplicity(required), required) {
            (Multiplicity::Single, _) => TypeArgument::Exact(required.clone()),
            (Multiplicity::Array, TypeDescriptor::Array { component }) => {
                TypeArgument::Exact((**component).clone())
            }
            _ => required
                .type_args()
                .first()
                .cloned()
                .unwrap_or(TypeArgument::Unbounded),
        }
    }

    /// Whether a value of type `candidate` can be injected where `required` is expected
    pub fn check(&self, candidate: &TypeDescriptor, required: &TypeDescriptor) -> Compatibility {
        if candidate.is_malformed() || required.is_malformed() {
            return Compatibility::Indeterminate;
        }
        Compatibility::from_bool(self.is_assignable(candidate, required))
    }

    /// Whether a candidate satisfies a component type (possibly a wildcard)
    pub fn accepts(&self, component: &TypeArgument, candidate: &TypeDescriptor) -> Compatibility {
        if candidate.is_malformed() || component.is_malformed() {
            return Compatibility::Indeterminate;
        }
        Compatibility::from_bool(match component {
            TypeArgument::Exact(bound) | TypeArgument::Extends(bound) => {
                self.is_assignable(candidate, bound)
            }
            TypeArgument::Super(bound) => self.is_assignable(bound, candidate),
            TypeArgument::Unbounded => true,
        })
    }

    /// Nominal, covariant assignability of `source` to `target`
    pub fn is_assignable(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.assignable(source, target, &mut HashSet::new(), 0)
    }

    fn is_top(&self, ty: &TypeDescriptor) -> bool {
        ty.nominal_name() == Some(self.known.top_type.as_str())
    }

    fn assignable(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        visited: &mut HashSet<TypeDescriptor>,
        depth: usize,
    ) -> bool {
        if depth > MAX_HIERARCHY_DEPTH {
            return false;
        }
        match (source, target) {
            (TypeDescriptor::Variable { .. }, _) | (_, TypeDescriptor::Variable { .. }) => {
                source == target
            }
            (_, target) if self.is_top(target) => true,
            (TypeDescriptor::Array { component: s }, TypeDescriptor::Array { component: t }) => {
                self.assignable(s, t, visited, depth + 1)
            }
            (
                TypeDescriptor::Declared { name: sn, args: sa },
                TypeDescriptor::Declared { name: tn, args: ta },
            ) => {
                if sn == tn {
                    return self.arguments_compatible(sa, ta, depth);
                }
                if !visited.insert(source.clone()) {
                    return false;
                }
                self.supertypes(sn, sa)
                    .iter()
                    .any(|supertype| self.assignable(supertype, target, visited, depth + 1))
            }
            _ => false,
        }
    }

    /// Direct supertypes of `name<args>` with parameters substituted
    ///
    /// A raw reference (no arguments, or a count that does not fit the
    /// declaration) sees erased supertypes.
    fn supertypes(&self, name: &str, args: &[TypeArgument]) -> Vec<TypeDescriptor> {
        let Some(declaration) = self.hierarchy.get(name) else {
            return Vec::new();
        };
        if args.is_empty() || args.len() != declaration.parameters.len() {
            return declaration
                .supertypes
                .iter()
                .map(TypeDescriptor::erasure)
                .collect();
        }
        let bindings: HashMap<String, TypeArgument> = declaration
            .parameters
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect();
        declaration
            .supertypes
            .iter()
            .filter_map(|supertype| match supertype.substitute(&bindings) {
                TypeArgument::Exact(resolved) => Some(resolved),
                _ => None,
            })
            .collect()
    }

    /// Argument-wise containment; raw types on either side are accepted unchecked
    fn arguments_compatible(&self, source: &[TypeArgument], target: &[TypeArgument], depth: usize) -> bool {
        if source.is_empty() || target.is_empty() {
            return true;
        }
        source.len() == target.len()
            && source
                .iter()
                .zip(target)
                .all(|(s, t)| self.contains(t, s, depth + 1))
    }

    /// Whether the target argument `outer` contains the source argument `inner`
    fn contains(&self, outer: &TypeArgument, inner: &TypeArgument, depth: usize) -> bool {
        let mut visited = HashSet::new();
        match (outer, inner) {
            (TypeArgument::Unbounded, _) => true,
            (TypeArgument::Exact(t), TypeArgument::Exact(s)) => t == s,
            (TypeArgument::Extends(t), TypeArgument::Exact(s) | TypeArgument::Extends(s)) => {
                self.assignable(s, t, &mut visited, depth)
            }
            (TypeArgument::Extends(t), TypeArgument::Unbounded | TypeArgument::Super(_)) => {
                self.is_top(t)
            }
            (TypeArgument::Super(t), TypeArgument::Exact(s) | TypeArgument::Super(s)) => {
                self.assignable(t, s, &mut visited, depth)
            }
            _ => false,
        }
    }
}
