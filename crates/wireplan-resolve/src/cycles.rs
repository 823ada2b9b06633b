//! Cycle Detector
//!
//! Depth-first traversal over the resolved wiring plan. Beans are nodes;
//! edges run from a bean to every bean resolved into one of its sockets,
//! and from a nested bean to its parent. Every detected cycle is a hard
//! error: resolution never tries to break one with laziness.
//!
//! The traversal is iterative with an explicit stack of frames, each
//! remembering the edge used to reach its bean. Reaching a bean already on
//! the stack reconstructs the loop from the frames above it.
//!
//! By default every root gets a fresh traversal. With memoization enabled,
//! an edge explored from one root is not explored again from later roots.

use crate::catalog::{BeanCatalog, EntryKind};
use crate::outcome::WiringPlan;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use tracing::trace;
use wireplan_domain::QualifiedName;

/// How one bean depends on the next
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "via", content = "socket")]
pub enum EdgeLabel {
    /// Injection through a socket
    Socket(QualifiedName),
    /// Accessor of the parent bean
    Nested,
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Socket(socket) => write!(f, "{socket}"),
            Self::Nested => write!(f, "nested"),
        }
    }
}

/// One step of a cycle
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleEdge {
    pub from: QualifiedName,
    pub via: EdgeLabel,
    pub to: QualifiedName,
}

/// A closed chain of edges; the last edge returns to the first bean
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyCycle {
    pub edges: Vec<CycleEdge>,
}

impl DependencyCycle {
    /// Rotate so that the edge leaving the smallest bean comes first
    fn canonical(mut edges: Vec<CycleEdge>) -> Self {
        if let Some(start) = edges
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.from.cmp(&b.from))
            .map(|(index, _)| index)
        {
            edges.rotate_left(start);
        }
        Self { edges }
    }

    /// Bean the cycle is reported on
    pub fn start(&self) -> Option<&QualifiedName> {
        self.edges.first().map(|edge| &edge.from)
    }

    /// Beans of the cycle in traversal order
    pub fn beans(&self) -> impl Iterator<Item = &QualifiedName> {
        self.edges.iter().map(|edge| &edge.from)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// `a --[socket]--> b --[socket]--> a`
    pub fn chain(&self) -> String {
        let mut chain = String::new();
        for (index, edge) in self.edges.iter().enumerate() {
            if index == 0 {
                chain.push_str(edge.from.as_str());
            }
            chain.push_str(&format!(" --[{}]--> {}", edge.via, edge.to));
        }
        chain
    }
}

impl fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chain())
    }
}

/// Stack frame of the iterative traversal
struct Frame<'g> {
    bean: &'g QualifiedName,
    /// Edge used to reach `bean`; `None` for the root
    via: Option<&'g EdgeLabel>,
    /// Next outgoing edge to explore
    next: usize,
}

type Adjacency = IndexMap<QualifiedName, Vec<(EdgeLabel, QualifiedName)>>;

/// Finds cycles among the resolved assignments of a plan
pub struct CycleDetector {
    adjacency: Adjacency,
    memoize: bool,
}

impl CycleDetector {
    /// Build the bean graph of `plan`
    pub fn new(catalog: &BeanCatalog, plan: &WiringPlan, memoize: bool) -> Self {
        let mut adjacency: Adjacency = IndexMap::new();
        for bean in catalog.beans() {
            let edges = adjacency.entry(bean.name.clone()).or_default();
            if let EntryKind::Nested { parent } = bean.kind {
                edges.push((EdgeLabel::Nested, catalog.bean(parent).name.clone()));
            }
        }
        for entry in plan.iter() {
            let edges = adjacency.entry(entry.owner.clone()).or_default();
            for bean in entry.outcome.resolved_beans() {
                edges.push((EdgeLabel::Socket(entry.socket.clone()), bean.clone()));
            }
        }
        adjacency.sort_keys();
        for edges in adjacency.values_mut() {
            edges.sort();
            edges.dedup();
        }
        Self { adjacency, memoize }
    }

    /// Every distinct cycle, each rotated to start at its smallest bean,
    /// ordered by that bean
    pub fn find_cycles(&self) -> Vec<DependencyCycle> {
        let mut found: BTreeSet<DependencyCycle> = BTreeSet::new();
        let mut explored: HashSet<(&QualifiedName, &QualifiedName)> = HashSet::new();

        for root in self.adjacency.keys() {
            if !self.memoize {
                explored.clear();
            }
            self.traverse(root, &mut explored, &mut found);
        }

        found.into_iter().collect()
    }

    fn traverse<'g>(
        &'g self,
        root: &'g QualifiedName,
        explored: &mut HashSet<(&'g QualifiedName, &'g QualifiedName)>,
        found: &mut BTreeSet<DependencyCycle>,
    ) {
        let mut stack: Vec<Frame<'g>> = vec![Frame {
            bean: root,
            via: None,
            next: 0,
        }];
        let mut on_stack: HashMap<&QualifiedName, usize> = HashMap::from([(root, 0)]);

        while let Some(top) = stack.last_mut() {
            let edges = self.edges(top.bean);
            let Some((label, target)) = edges.get(top.next) else {
                let finished = stack.pop();
                if let Some(frame) = finished {
                    on_stack.remove(frame.bean);
                }
                continue;
            };
            top.next += 1;
            let from = top.bean;

            if let Some(&position) = on_stack.get(target) {
                let cycle = Self::reconstruct(&stack[position..], label, target);
                trace!(cycle = %cycle, "Cycle detected");
                found.insert(cycle);
                continue;
            }
            if !explored.insert((from, target)) {
                continue;
            }

            trace!(from = %from, to = %target, "Descending");
            on_stack.insert(target, stack.len());
            stack.push(Frame {
                bean: target,
                via: Some(label),
                next: 0,
            });
        }
    }

    fn edges(&self, bean: &QualifiedName) -> &[(EdgeLabel, QualifiedName)] {
        self.adjacency.get(bean).map(Vec::as_slice).unwrap_or_default()
    }

    /// Walk the frames from the repeated bean to the top and close the loop
    fn reconstruct(frames: &[Frame<'_>], closing: &EdgeLabel, target: &QualifiedName) -> DependencyCycle {
        let mut edges: Vec<CycleEdge> = frames
            .windows(2)
            .filter_map(|pair| {
                pair[1].via.map(|via| CycleEdge {
                    from: pair[0].bean.clone(),
                    via: via.clone(),
                    to: pair[1].bean.clone(),
                })
            })
            .collect();
        if let Some(last) = frames.last() {
            edges.push(CycleEdge {
                from: last.bean.clone(),
                via: closing.clone(),
                to: target.clone(),
            });
        }
        DependencyCycle::canonical(edges)
    }
}
