//! Module Scheduler
//!
//! Orders modules so that every module is resolved after the modules it
//! imports. Kahn's algorithm groups modules into levels; modules within a
//! level do not import each other and may resolve concurrently.

use crate::catalog::{BeanCatalog, SocketId};
use crate::diagnostics::{join_names, Diagnostics, WiringDiagnostic};
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeMap;
use wireplan_domain::QualifiedName;

/// Resolution order of the modules of a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSchedule {
    /// Levels in dependency order, each sorted by name
    pub levels: Vec<Vec<QualifiedName>>,
    /// Modules that cannot be scheduled because of an import cycle
    pub blocked: Vec<QualifiedName>,
    /// Known direct importers of each module, sorted by name
    pub importers: BTreeMap<QualifiedName, Vec<QualifiedName>>,
}

impl ModuleSchedule {
    /// Scheduled modules in resolution order
    pub fn ordered(&self) -> impl Iterator<Item = &QualifiedName> {
        self.levels.iter().flatten()
    }

    pub fn is_scheduled(&self, module: &QualifiedName) -> bool {
        self.ordered().any(|scheduled| scheduled == module)
    }

    /// Assign the external sockets of every imported module to the module
    /// whose pass resolves them
    ///
    /// The first scheduled importer by name supplies them. A module imported
    /// by several modules gets a diagnostic on each of its external sockets.
    pub fn assign_suppliers(
        &self,
        catalog: &BeanCatalog,
        diagnostics: &Diagnostics,
    ) -> BTreeMap<QualifiedName, Vec<SocketId>> {
        let mut supplied: BTreeMap<QualifiedName, Vec<SocketId>> = BTreeMap::new();
        for module in catalog.modules() {
            let importers: Vec<&QualifiedName> = self
                .importers
                .get(&module.name)
                .into_iter()
                .flatten()
                .filter(|importer| self.is_scheduled(importer))
                .collect();
            let Some(supplier) = importers.first() else {
                continue;
            };
            for socket in catalog.external_sockets(module) {
                if importers.len() > 1 {
                    diagnostics.report(WiringDiagnostic::SharedModuleSocket {
                        element: socket.name.clone(),
                        importers: join_names(importers.iter().copied()),
                    });
                }
                supplied.entry((*supplier).clone()).or_default().push(socket.id);
            }
        }
        supplied
    }
}

/// Computes import levels
pub struct ModuleScheduler;

impl ModuleScheduler {
    /// Schedule every module of `catalog`
    ///
    /// Unknown imports are reported and ignored. Modules left over once no
    /// module is free of pending imports are reported as an import cycle and
    /// not scheduled.
    pub fn schedule(catalog: &BeanCatalog, diagnostics: &Diagnostics) -> ModuleSchedule {
        let mut in_degree: IndexMap<&QualifiedName, usize> = IndexMap::new();
        let mut dependents: IndexMap<&QualifiedName, Vec<&QualifiedName>> = IndexMap::new();

        for module in catalog.modules() {
            in_degree.insert(&module.name, 0);
        }

        for module in catalog.modules() {
            let mut seen: IndexSet<&QualifiedName> = IndexSet::new();
            for import in &module.imports {
                if import == &module.name {
                    continue;
                }
                if catalog.module(import).is_none() {
                    diagnostics.report(WiringDiagnostic::UnknownImport {
                        element: module.name.clone(),
                        import: import.clone(),
                    });
                    continue;
                }
                if seen.insert(import) {
                    *in_degree.entry(&module.name).or_default() += 1;
                    dependents.entry(import).or_default().push(&module.name);
                }
            }
        }

        let importers: BTreeMap<QualifiedName, Vec<QualifiedName>> = dependents
            .iter()
            .map(|(module, importers)| {
                let mut importers: Vec<QualifiedName> = importers.iter().map(|name| (*name).clone()).collect();
                importers.sort();
                ((*module).clone(), importers)
            })
            .collect();

        let mut levels = Vec::new();
        let mut current: Vec<&QualifiedName> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();

        while !current.is_empty() {
            // Sort for determinism
            current.sort();
            let mut next = Vec::new();
            for module in &current {
                for dependent in dependents.get(module).into_iter().flatten() {
                    if let Some(degree) = in_degree.get_mut(dependent) {
                        *degree -= 1;
                        if *degree == 0 {
                            next.push(*dependent);
                        }
                    }
                }
            }
            levels.push(current.iter().map(|name| (*name).clone()).collect());
            current = next;
        }

        let mut blocked: Vec<QualifiedName> = in_degree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(name, _)| (*name).clone())
            .collect();
        blocked.sort();
        for module in &blocked {
            diagnostics.report(WiringDiagnostic::ImportCycle {
                element: module.clone(),
                modules: join_names(&blocked),
            });
        }

        ModuleSchedule {
            levels,
            blocked,
            importers,
        }
    }
}
