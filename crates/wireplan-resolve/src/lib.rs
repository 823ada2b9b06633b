//! # Wireplan Resolve
//!
//! Compile-time dependency-injection resolution: decides, for every socket
//! of every module, which bean(s) satisfy it, and validates the resulting
//! wiring plan before any code is generated.
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | 1 | [`catalog`] | Flatten the graph into an arena of beans and sockets |
//! | 2 | [`scheduler`] | Order modules so imports resolve first |
//! | 3 | [`resolver`] | Resolve each module's sockets (directives, matching, reconciliation) |
//! | 4 | [`cycles`] | Detect dependency cycles among the resolved assignments |
//! | 5 | [`reporter`] | Summarize the plan and every diagnostic |
//!
//! Problems never surface as `Err`: they are accumulated as
//! [`WiringDiagnostic`]s and the caller must refuse to generate code when
//! [`ResolutionReport::has_errors`] is true.
//!
//! ```ignore
//! use wireplan_resolve::WiringResolver;
//!
//! let report = WiringResolver::new(ResolverConfig::default()).resolve(&graph);
//! if report.has_errors() {
//!     eprintln!("{}", Reporter::to_human_readable(&report));
//! }
//! ```

pub mod catalog;
pub mod cycles;
pub mod diagnostic;
#[macro_use]
pub mod diagnostic_macro;
pub mod diagnostics;
pub mod directives;
pub mod matcher;
pub mod outcome;
mod parallel;
pub mod reporter;
pub mod resolver;
pub mod scheduler;

use std::collections::HashSet;
use tracing::{debug, info};
use wireplan_domain::{ResolverConfig, WiringGraph};

pub use catalog::{BeanCatalog, BeanId, SocketId, SocketOrigin};
pub use cycles::{CycleDetector, CycleEdge, DependencyCycle, EdgeLabel};
pub use diagnostic::{Diagnostic, DiagnosticCategory};
pub use diagnostics::{Diagnostics, WiringDiagnostic};
pub use directives::DirectiveStore;
pub use matcher::{Compatibility, Multiplicity, TypeHierarchy, TypeMatcher};
pub use outcome::{MultiOrdering, Mutation, PlanEntry, ResolutionOutcome, WiringPlan};
pub use reporter::{DiagnosticEntry, Reporter, ResolutionReport, ResolutionSummary};
pub use resolver::SocketResolver;
pub use scheduler::{ModuleSchedule, ModuleScheduler};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    /// Blocks code generation
    Error,
    /// Informational, e.g. an unresolved type during incremental compilation
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Resolves a complete wiring graph
///
/// Stateless between runs: resolving the same graph twice yields the same
/// plan and the same diagnostics.
#[derive(Debug, Clone, Default)]
pub struct WiringResolver {
    config: ResolverConfig,
}

impl WiringResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve every socket of `graph` and validate the plan
    pub fn resolve(&self, graph: &WiringGraph) -> ResolutionReport {
        let diagnostics = Diagnostics::new();
        let matcher = TypeMatcher::new(
            TypeHierarchy::from_declarations(&graph.types),
            self.config.known_types.clone(),
        );
        let catalog = BeanCatalog::build(graph, &matcher, &diagnostics);
        let schedule = ModuleScheduler::schedule(&catalog, &diagnostics);
        let supplied = schedule.assign_suppliers(&catalog, &diagnostics);

        info!(
            modules = catalog.modules().count(),
            beans = catalog.beans().count(),
            sockets = catalog.sockets().count(),
            levels = schedule.levels.len(),
            "Resolving wiring graph"
        );

        let resolver = SocketResolver::new(&catalog, &matcher, &self.config);
        let mut plan = WiringPlan::new();
        for level in &schedule.levels {
            let modules: Vec<_> = level.iter().filter_map(|name| catalog.module(name)).collect();
            let resolved = parallel::map_items(&modules, self.config.parallel, |module| {
                let sockets = supplied.get(&module.name).map_or(&[][..], Vec::as_slice);
                let entries = resolver.resolve_module(module, sockets, &diagnostics);
                info!(module = %module.name, sockets = entries.len(), "Module resolved");
                entries
            });
            plan.extend(resolved.into_iter().flatten());
        }

        self.plan_runtime_sockets(&catalog, &matcher, &schedule, &mut plan, &diagnostics);

        let cycles = CycleDetector::new(&catalog, &plan, self.config.memoize_cycle_search).find_cycles();
        for cycle in &cycles {
            if let Some(start) = cycle.start() {
                diagnostics.report(WiringDiagnostic::DependencyCycle {
                    element: start.clone(),
                    chain: cycle.chain(),
                });
            }
        }

        let report = ResolutionReport::new(plan, &diagnostics.into_sorted());
        info!(
            sockets = report.summary.total_sockets,
            errors = report.summary.error_count,
            warnings = report.summary.warning_count,
            cycles = report.summary.cycle_count,
            passed = report.summary.passed,
            "Wiring resolution complete"
        );
        report
    }

    /// External sockets of modules nobody imports are supplied at runtime
    fn plan_runtime_sockets(
        &self,
        catalog: &BeanCatalog,
        matcher: &TypeMatcher,
        schedule: &ModuleSchedule,
        plan: &mut WiringPlan,
        diagnostics: &Diagnostics,
    ) {
        let blocked: HashSet<_> = schedule.blocked.iter().collect();
        for module in catalog.modules().filter(|module| !blocked.contains(&module.name)) {
            for socket in catalog.external_sockets(module) {
                if plan.contains(&socket.name) {
                    continue;
                }
                debug!(socket = %socket.name, "Socket supplied at runtime");
                if self.config.warn_on_unresolved_root_sockets {
                    diagnostics.report(WiringDiagnostic::UnsuppliedRootSocket {
                        element: socket.name.clone(),
                    });
                }
                plan.insert(PlanEntry {
                    socket: socket.name.clone(),
                    owner: catalog.bean(socket.owner).name.clone(),
                    origin: socket.origin,
                    multiplicity: socket.multiplicity(matcher),
                    resolved_in: None,
                    outcome: ResolutionOutcome::Unresolved,
                });
            }
        }
    }
}
