//! Resolution outcomes and the wiring plan
//!
//! The plan is the only state the resolver produces: a map from every
//! socket's qualified name to what it resolved to. Declarations are never
//! mutated to record results.

use crate::catalog::SocketOrigin;
use crate::matcher::Multiplicity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::slice;
use wireplan_domain::{QualifiedName, TypeDescriptor};

/// Order of the beans of a resolved multi-socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiOrdering {
    /// Order written in the wiring directives
    Directive,
    /// Ascending qualified name
    QualifiedName,
}

/// Transformation step recorded on a single-socket outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    /// Type the resolved bean was matched against
    pub input: TypeDescriptor,
    /// Type handed to the receiving bean
    pub output: TypeDescriptor,
}

/// What one socket resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ResolutionOutcome {
    /// No bean; acceptable for optional sockets and runtime-supplied sockets
    Unresolved,
    ResolvedSingle {
        bean: QualifiedName,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mutation: Option<Mutation>,
    },
    ResolvedMulti {
        beans: Vec<QualifiedName>,
        ordering: MultiOrdering,
    },
    /// Several candidates for a single socket
    Ambiguous { candidates: Vec<QualifiedName> },
    /// No candidate for a mandatory socket
    MissingRequired,
}

impl ResolutionOutcome {
    /// Whether the outcome blocks code generation
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Ambiguous { .. } | Self::MissingRequired)
    }

    /// Beans the socket is wired to
    pub fn resolved_beans(&self) -> &[QualifiedName] {
        match self {
            Self::ResolvedSingle { bean, .. } => slice::from_ref(bean),
            Self::ResolvedMulti { beans, .. } => beans,
            _ => &[],
        }
    }

    /// Short label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::ResolvedSingle { .. } => "resolved_single",
            Self::ResolvedMulti { .. } => "resolved_multi",
            Self::Ambiguous { .. } => "ambiguous",
            Self::MissingRequired => "missing_required",
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved"),
            Self::ResolvedSingle { bean, mutation } => {
                write!(f, "{bean}")?;
                if let Some(mutation) = mutation {
                    write!(f, " ({} -> {})", mutation.input, mutation.output)?;
                }
                Ok(())
            }
            Self::ResolvedMulti { beans, .. } => {
                let names: Vec<&str> = beans.iter().map(QualifiedName::as_str).collect();
                write!(f, "[{}]", names.join(", "))
            }
            Self::Ambiguous { candidates } => write!(f, "ambiguous ({} candidates)", candidates.len()),
            Self::MissingRequired => write!(f, "missing"),
        }
    }
}

/// One socket of the wiring plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub socket: QualifiedName,
    /// Bean whose construction consumes the socket
    pub owner: QualifiedName,
    pub origin: SocketOrigin,
    pub multiplicity: Multiplicity,
    /// Module whose pass resolved the socket; `None` when supplied at runtime
    pub resolved_in: Option<QualifiedName>,
    pub outcome: ResolutionOutcome,
}

/// Socket qualified name to resolution outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WiringPlan {
    entries: BTreeMap<QualifiedName, PlanEntry>,
}

impl WiringPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, entry: PlanEntry) {
        self.entries.insert(entry.socket.clone(), entry);
    }

    pub(crate) fn extend(&mut self, entries: impl IntoIterator<Item = PlanEntry>) {
        for entry in entries {
            self.insert(entry);
        }
    }

    pub fn get(&self, socket: &QualifiedName) -> Option<&PlanEntry> {
        self.entries.get(socket)
    }

    /// Outcome of a socket, if it was planned
    pub fn outcome(&self, socket: &QualifiedName) -> Option<&ResolutionOutcome> {
        self.entries.get(socket).map(|entry| &entry.outcome)
    }

    pub fn contains(&self, socket: &QualifiedName) -> bool {
        self.entries.contains_key(socket)
    }

    /// Entries in qualified-name order
    pub fn iter(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.values()
    }

    /// Bare outcome map, for comparing runs
    pub fn outcomes(&self) -> BTreeMap<QualifiedName, ResolutionOutcome> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.outcome.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
