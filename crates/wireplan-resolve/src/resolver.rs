//! Socket Resolver
//!
//! Resolves every socket of one module pass. Sockets are independent of
//! each other: the only shared state is the read-only catalog and the
//! diagnostics collector, so a module's sockets may resolve in parallel.
//!
//! Per socket:
//! 1. When directives name the socket, the candidates are exactly their
//!    beans; invalid entries are reported and dropped, never replaced by
//!    automatic matching.
//! 2. Otherwise every visible bean whose type matches and which passes all
//!    selectors is a candidate.
//! 3. Cardinality reconciliation turns the candidates into an outcome.

use crate::catalog::{BeanCatalog, BeanId, ModuleEntry, SocketEntry, SocketId};
use crate::diagnostics::{join_names, Diagnostics, WiringDiagnostic};
use crate::directives::DirectiveStore;
use crate::matcher::{Compatibility, Multiplicity, TypeMatcher};
use crate::outcome::{MultiOrdering, Mutation, PlanEntry, ResolutionOutcome};
use crate::parallel::map_items;
use std::collections::HashSet;
use tracing::debug;
use wireplan_domain::entities::CompiledSelector;
use wireplan_domain::{QualifiedName, ResolverConfig, TypeArgument};

/// Candidates of one socket before reconciliation
struct Candidates {
    beans: Vec<QualifiedName>,
    ordering: MultiOrdering,
}

/// Resolves the sockets of a module pass against a shared catalog
pub struct SocketResolver<'a> {
    catalog: &'a BeanCatalog,
    matcher: &'a TypeMatcher,
    config: &'a ResolverConfig,
}

impl<'a> SocketResolver<'a> {
    pub fn new(catalog: &'a BeanCatalog, matcher: &'a TypeMatcher, config: &'a ResolverConfig) -> Self {
        Self {
            catalog,
            matcher,
            config,
        }
    }

    /// Resolve `module`'s own bean sockets plus the external sockets it supplies
    pub fn resolve_module(
        &self,
        module: &ModuleEntry,
        supplied: &[SocketId],
        diagnostics: &Diagnostics,
    ) -> Vec<PlanEntry> {
        let sockets: Vec<SocketId> = module
            .sockets
            .iter()
            .copied()
            .filter(|id| !self.catalog.socket(*id).is_external())
            .chain(supplied.iter().copied())
            .collect();

        let directives = DirectiveStore::from_directives(&module.directives, diagnostics);
        let resolvable: HashSet<&QualifiedName> = sockets
            .iter()
            .map(|id| &self.catalog.socket(*id).name)
            .collect();
        for target in directives.targets() {
            if !resolvable.contains(target) {
                diagnostics.report(WiringDiagnostic::UnknownDirectiveSocket {
                    element: target.clone(),
                    module: module.name.clone(),
                });
            }
        }

        let visible = self.catalog.visible_beans(module);
        map_items(&sockets, self.config.parallel, |id| {
            self.resolve_socket(module, self.catalog.socket(*id), &visible, &directives, diagnostics)
        })
    }

    /// Resolve one socket in the pass of `module`
    pub fn resolve_socket(
        &self,
        module: &ModuleEntry,
        entry: &SocketEntry,
        visible: &[BeanId],
        directives: &DirectiveStore,
        diagnostics: &Diagnostics,
    ) -> PlanEntry {
        let socket = &entry.socket;
        let multiplicity = entry.multiplicity(self.matcher);
        let component = match multiplicity {
            Multiplicity::Single => TypeArgument::Exact(socket.matched_type().clone()),
            _ => self.matcher.component_type(&socket.required_type),
        };

        let outcome = if socket.required_type.is_malformed() || component.is_malformed() {
            let malformed = if socket.required_type.is_malformed() {
                socket.required_type.to_string()
            } else {
                socket.matched_type().to_string()
            };
            diagnostics.report(WiringDiagnostic::UnresolvedType {
                element: entry.name.clone(),
                type_name: malformed,
            });
            ResolutionOutcome::Unresolved
        } else {
            // External sockets never see the beans of the module that declares them
            let pool: Vec<BeanId> = visible
                .iter()
                .copied()
                .filter(|id| !entry.is_external() || !self.catalog.bean(*id).name.belongs_to(&entry.module))
                .collect();
            let candidates = match directives.beans_for(&entry.name) {
                Some(beans) => self.directed_candidates(module, entry, &component, &pool, beans, diagnostics),
                None => self.matched_candidates(entry, &component, &pool, diagnostics),
            };
            self.reconcile(entry, multiplicity, candidates, diagnostics)
        };

        debug!(
            socket = %entry.name,
            multiplicity = %multiplicity,
            outcome = %outcome,
            "Resolved socket"
        );

        PlanEntry {
            socket: entry.name.clone(),
            owner: self.catalog.bean(entry.owner).name.clone(),
            origin: entry.origin,
            multiplicity,
            resolved_in: Some(module.name.clone()),
            outcome,
        }
    }

    fn directed_candidates<'b>(
        &self,
        module: &ModuleEntry,
        entry: &SocketEntry,
        component: &TypeArgument,
        pool: &[BeanId],
        beans: impl Iterator<Item = &'b QualifiedName>,
        diagnostics: &Diagnostics,
    ) -> Candidates {
        let mut accepted = Vec::new();
        for name in beans {
            let Some(bean) = self.catalog.bean_by_name(name) else {
                diagnostics.report(WiringDiagnostic::UnknownDirectiveBean {
                    element: entry.name.clone(),
                    bean: name.clone(),
                    reason: "does not exist".to_string(),
                });
                continue;
            };
            if !pool.contains(&bean.id) {
                let reason = if entry.is_external() && bean.name.belongs_to(&entry.module) {
                    format!("belongs to {}, the module declaring the socket", entry.module)
                } else {
                    format!("is not visible from module {}", module.name)
                };
                diagnostics.report(WiringDiagnostic::UnknownDirectiveBean {
                    element: entry.name.clone(),
                    bean: name.clone(),
                    reason,
                });
                continue;
            }
            match self.matcher.accepts(component, &bean.exposed_type) {
                Compatibility::Compatible => accepted.push(bean.name.clone()),
                Compatibility::Incompatible => {
                    diagnostics.report(WiringDiagnostic::IncompatibleDirectiveBean {
                        element: entry.name.clone(),
                        bean: bean.name.clone(),
                        bean_type: bean.exposed_type.to_string(),
                        required_type: component.to_string(),
                    });
                }
                // Already reported on the bean
                Compatibility::Indeterminate => {}
            }
        }
        Candidates {
            beans: accepted,
            ordering: MultiOrdering::Directive,
        }
    }

    fn matched_candidates(
        &self,
        entry: &SocketEntry,
        component: &TypeArgument,
        pool: &[BeanId],
        diagnostics: &Diagnostics,
    ) -> Candidates {
        let mut selectors: Vec<CompiledSelector> = Vec::with_capacity(entry.socket.selectors.len());
        for selector in &entry.socket.selectors {
            match selector.compile() {
                Ok(compiled) => selectors.push(compiled),
                Err(err) => {
                    diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                        element: entry.name.clone(),
                        reason: format!("selector {selector} is invalid: {err}"),
                    });
                    // A broken selector rejects every candidate
                    return Candidates {
                        beans: Vec::new(),
                        ordering: MultiOrdering::QualifiedName,
                    };
                }
            }
        }

        let beans = pool
            .iter()
            .map(|id| self.catalog.bean(*id))
            .filter(|bean| self.matcher.accepts(component, &bean.exposed_type) == Compatibility::Compatible)
            .filter(|bean| {
                let facts = bean.facts();
                selectors.iter().all(|selector| selector.matches(&facts))
            })
            .map(|bean| bean.name.clone())
            .collect();
        Candidates {
            beans,
            ordering: MultiOrdering::QualifiedName,
        }
    }

    fn reconcile(
        &self,
        entry: &SocketEntry,
        multiplicity: Multiplicity,
        candidates: Candidates,
        diagnostics: &Diagnostics,
    ) -> ResolutionOutcome {
        let socket = &entry.socket;
        if candidates.beans.is_empty() && socket.is_mandatory() {
            diagnostics.report(WiringDiagnostic::MissingRequiredDependency {
                element: entry.name.clone(),
                required_type: socket.matched_type().to_string(),
            });
            return ResolutionOutcome::MissingRequired;
        }

        if multiplicity.is_multi() {
            return ResolutionOutcome::ResolvedMulti {
                beans: candidates.beans,
                ordering: candidates.ordering,
            };
        }

        let mut beans = candidates.beans;
        match beans.len() {
            0 => ResolutionOutcome::Unresolved,
            1 => ResolutionOutcome::ResolvedSingle {
                bean: beans.remove(0),
                mutation: socket.mutator.as_ref().map(|mutator| Mutation {
                    input: mutator.input.clone(),
                    output: mutator.output.clone(),
                }),
            },
            _ => {
                diagnostics.report(WiringDiagnostic::AmbiguousDependency {
                    element: entry.name.clone(),
                    candidates: join_names(&beans),
                });
                ResolutionOutcome::Ambiguous { candidates: beans }
            }
        }
    }
}
