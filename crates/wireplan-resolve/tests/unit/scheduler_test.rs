//! Tests for the Module Scheduler

use crate::test_utils::{graph, leaf, module, qn, resolve, ty};
use wireplan_domain::{Bean, KnownTypes, QualifiedName, Socket, WiringGraph};
use wireplan_resolve::{
    BeanCatalog, Diagnostic, Diagnostics, ModuleSchedule, ModuleScheduler, ResolutionOutcome,
    TypeHierarchy, TypeMatcher,
};

fn schedule(graph: &WiringGraph) -> (BeanCatalog, ModuleSchedule, Diagnostics) {
    let matcher = TypeMatcher::new(TypeHierarchy::default(), KnownTypes::default());
    let diagnostics = Diagnostics::new();
    let catalog = BeanCatalog::build(graph, &matcher, &diagnostics);
    let schedule = ModuleScheduler::schedule(&catalog, &diagnostics);
    (catalog, schedule, diagnostics)
}

fn level_names(schedule: &ModuleSchedule) -> Vec<Vec<&str>> {
    schedule
        .levels
        .iter()
        .map(|level| level.iter().map(QualifiedName::as_str).collect())
        .collect()
}

#[test]
fn test_imports_are_scheduled_first() {
    let (_, schedule, diagnostics) = schedule(&graph(vec![
        module("a", vec![]).with_import(qn("b")),
        module("b", vec![]).with_import(qn("c")),
        module("c", vec![]),
    ]));

    assert!(diagnostics.is_empty());
    assert_eq!(level_names(&schedule), vec![vec!["c"], vec!["b"], vec!["a"]]);
    assert!(schedule.blocked.is_empty());
}

#[test]
fn test_independent_modules_share_a_level() {
    let (_, schedule, _) = schedule(&graph(vec![
        module("web", vec![]).with_import(qn("db")).with_import(qn("cache")),
        module("db", vec![]),
        module("cache", vec![]),
        module("cli", vec![]).with_import(qn("db")),
    ]));

    assert_eq!(
        level_names(&schedule),
        vec![vec!["cache", "db"], vec!["cli", "web"]]
    );
    assert_eq!(
        schedule.importers.get(&qn("db")),
        Some(&vec![qn("cli"), qn("web")])
    );
}

#[test]
fn test_unknown_import_is_reported_and_ignored() {
    let (_, schedule, diagnostics) = schedule(&graph(vec![
        module("app", vec![]).with_import(qn("missing"))
    ]));

    let reported = diagnostics.snapshot();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].id(), "WIRE011");
    assert_eq!(level_names(&schedule), vec![vec!["app"]]);
}

#[test]
fn test_duplicate_and_self_imports_are_ignored() {
    let (_, schedule, diagnostics) = schedule(&graph(vec![
        module("app", vec![])
            .with_import(qn("lib"))
            .with_import(qn("lib"))
            .with_import(qn("app")),
        module("lib", vec![]),
    ]));

    assert!(diagnostics.is_empty());
    assert_eq!(level_names(&schedule), vec![vec!["lib"], vec!["app"]]);
}

#[test]
fn test_import_cycle_blocks_modules() {
    let (_, schedule, diagnostics) = schedule(&graph(vec![
        module("x", vec![]).with_import(qn("y")),
        module("y", vec![]).with_import(qn("x")),
        module("top", vec![]).with_import(qn("x")),
        module("free", vec![]),
    ]));

    assert_eq!(level_names(&schedule), vec![vec!["free"]]);
    assert_eq!(schedule.blocked, vec![qn("top"), qn("x"), qn("y")]);
    let reported = diagnostics.snapshot();
    assert_eq!(reported.len(), 3);
    assert!(reported.iter().all(|d| d.id() == "WIRE012" && d.is_error()));
}

#[test]
fn test_blocked_modules_are_not_resolved() {
    let report = resolve(&graph(vec![
        module(
            "x",
            vec![crate::test_utils::bean(
                "service",
                "app.Service",
                vec![Socket::required("store", ty("app.Store"))],
            )],
        )
        .with_import(qn("y")),
        module("y", vec![leaf("store", "app.Store")]).with_import(qn("x")),
    ]));

    assert!(report.has_errors());
    assert!(report.plan.get(&qn("x:service:store")).is_none());
}

#[test]
fn test_suppliers_are_assigned_to_first_importer() {
    let (catalog, schedule, diagnostics) = schedule(&graph(vec![
        module(
            "lib",
            vec![Bean::socket_bean(Socket::required("source", ty("app.DataSource")))],
        ),
        module("second", vec![]).with_import(qn("lib")),
        module("first", vec![]).with_import(qn("lib")),
    ]));

    let supplied = schedule.assign_suppliers(&catalog, &diagnostics);
    assert_eq!(supplied.len(), 1);
    let sockets = &supplied[&qn("first")];
    assert_eq!(sockets.len(), 1);
    assert_eq!(catalog.socket(sockets[0]).name, qn("lib:source"));

    let reported = diagnostics.snapshot();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].id(), "WIRE014");
}

#[test]
fn test_resolution_follows_levels() {
    let report = resolve(&graph(vec![
        module(
            "lib",
            vec![
                Bean::socket_bean(Socket::required("clock", ty("app.Clock"))),
                crate::test_utils::bean(
                    "scheduler",
                    "app.Scheduler",
                    vec![Socket::required("clock", ty("app.Clock"))],
                ),
            ],
        ),
        module("app", vec![leaf("systemClock", "app.Clock")]).with_import(qn("lib")),
    ]));

    assert!(!report.has_errors());
    assert_eq!(
        report.plan.outcome(&qn("lib:clock")),
        Some(&ResolutionOutcome::ResolvedSingle {
            bean: qn("app:systemClock"),
            mutation: None,
        })
    );
}
