//! Tests for cross-module visibility, socket beans and overridable beans

use crate::test_utils::{
    bean, count_id, graph, leaf, list_of, module, outcome, qn, resolve, resolve_with, ty,
};
use wireplan_domain::{Bean, ResolverConfig, Socket};
use wireplan_resolve::{Multiplicity, ResolutionOutcome, SocketOrigin};

#[test]
fn test_private_bean_is_invisible_to_other_modules() {
    let report = resolve(&graph(vec![
        module(
            "app",
            vec![bean(
                "service",
                "app.Service",
                vec![Socket::required("store", ty("app.Store"))],
            )],
        )
        .with_import(qn("lib")),
        module("lib", vec![leaf("store", "app.Store").private()]),
    ]));

    assert!(report.has_errors());
    assert_eq!(outcome(&report, "app:service:store"), &ResolutionOutcome::MissingRequired);
}

#[test]
fn test_private_bean_is_visible_in_its_own_module() {
    let report = resolve(&graph(vec![module(
        "lib",
        vec![
            bean(
                "service",
                "app.Service",
                vec![Socket::required("store", ty("app.Store"))],
            ),
            leaf("store", "app.Store").private(),
        ],
    )]));

    assert_eq!(
        outcome(&report, "lib:service:store").resolved_beans(),
        &[qn("lib:store")]
    );
}

#[test]
fn test_public_bean_of_imported_module_is_a_candidate() {
    let report = resolve(&graph(vec![
        module(
            "app",
            vec![bean(
                "service",
                "app.Service",
                vec![Socket::required("store", ty("app.Store"))],
            )],
        )
        .with_import(qn("lib")),
        module("lib", vec![leaf("store", "app.Store")]),
    ]));

    assert!(!report.has_errors());
    assert_eq!(
        outcome(&report, "app:service:store").resolved_beans(),
        &[qn("lib:store")]
    );
}

#[test]
fn test_imports_are_not_transitive() {
    let report = resolve(&graph(vec![
        module(
            "app",
            vec![bean(
                "service",
                "app.Service",
                vec![Socket::required("store", ty("app.Store"))],
            )],
        )
        .with_import(qn("middle")),
        module("middle", vec![]).with_import(qn("lib")),
        module("lib", vec![leaf("store", "app.Store")]),
    ]));

    assert_eq!(outcome(&report, "app:service:store"), &ResolutionOutcome::MissingRequired);
}

fn lib_with_socket_bean() -> wireplan_domain::Module {
    module(
        "lib",
        vec![
            Bean::socket_bean(Socket::required("dataSource", ty("app.DataSource"))),
            bean(
                "repository",
                "app.Repository",
                vec![Socket::required("source", ty("app.DataSource"))],
            ),
        ],
    )
}

#[test]
fn test_socket_bean_is_supplied_by_the_importer() {
    let report = resolve(&graph(vec![
        lib_with_socket_bean(),
        module("app", vec![leaf("pool", "app.DataSource")]).with_import(qn("lib")),
    ]));

    assert!(!report.has_errors());
    // Inside lib the socket bean is the candidate
    assert_eq!(
        outcome(&report, "lib:repository:source").resolved_beans(),
        &[qn("lib:dataSource")]
    );
    // The importer supplies the socket bean itself
    let entry = report.plan.get(&qn("lib:dataSource")).unwrap();
    assert_eq!(entry.origin, SocketOrigin::SocketBean);
    assert_eq!(entry.resolved_in, Some(qn("app")));
    assert_eq!(entry.outcome.resolved_beans(), &[qn("app:pool")]);
}

#[test]
fn test_socket_bean_is_not_visible_to_importers() {
    let report = resolve(&graph(vec![
        lib_with_socket_bean(),
        module(
            "app",
            vec![
                leaf("pool", "app.DataSource"),
                bean(
                    "reporting",
                    "app.Reporting",
                    vec![Socket::required("source", ty("app.DataSource"))],
                ),
            ],
        )
        .with_import(qn("lib")),
    ]));

    assert_eq!(
        outcome(&report, "app:reporting:source").resolved_beans(),
        &[qn("app:pool")]
    );
}

#[test]
fn test_root_socket_bean_is_supplied_at_runtime() {
    let report = resolve(&graph(vec![lib_with_socket_bean()]));

    assert!(!report.has_errors());
    assert!(report.diagnostics.is_empty());
    let entry = report.plan.get(&qn("lib:dataSource")).unwrap();
    assert_eq!(entry.outcome, ResolutionOutcome::Unresolved);
    assert_eq!(entry.resolved_in, None);
}

#[test]
fn test_root_socket_bean_warning_is_configurable() {
    let config = ResolverConfig {
        warn_on_unresolved_root_sockets: true,
        ..ResolverConfig::default()
    };
    let report = resolve_with(&graph(vec![lib_with_socket_bean()]), config);

    assert!(!report.has_errors());
    assert_eq!(count_id(&report, "WIRE013"), 1);
}

#[test]
fn test_required_socket_bean_without_supplier_in_importer() {
    let report = resolve(&graph(vec![
        lib_with_socket_bean(),
        module("app", vec![]).with_import(qn("lib")),
    ]));

    assert!(report.has_errors());
    assert_eq!(outcome(&report, "lib:dataSource"), &ResolutionOutcome::MissingRequired);
}

#[test]
fn test_module_imported_twice_is_reported() {
    let report = resolve(&graph(vec![
        lib_with_socket_bean(),
        module("first", vec![leaf("pool", "app.DataSource")]).with_import(qn("lib")),
        module("second", vec![leaf("pool", "app.DataSource")]).with_import(qn("lib")),
    ]));

    assert!(report.has_errors());
    assert_eq!(count_id(&report, "WIRE014"), 1);
    let entry = report.plan.get(&qn("lib:dataSource")).unwrap();
    assert_eq!(entry.resolved_in, Some(qn("first")));
    assert_eq!(entry.outcome.resolved_beans(), &[qn("first:pool")]);
}

fn lib_with_overridable_cache() -> wireplan_domain::Module {
    module("lib", vec![leaf("cache", "app.Cache").overridable()])
}

#[test]
fn test_override_socket_resolves_to_external_bean() {
    let report = resolve(&graph(vec![
        lib_with_overridable_cache(),
        module("app", vec![leaf("customCache", "app.Cache")]).with_import(qn("lib")),
    ]));

    assert!(!report.has_errors());
    let entry = report.plan.get(&qn("lib:cache:override")).unwrap();
    assert_eq!(entry.origin, SocketOrigin::Override);
    assert_eq!(entry.owner, qn("lib:cache"));
    // The original bean never competes with its override
    assert_eq!(entry.outcome.resolved_beans(), &[qn("app:customCache")]);
}

#[test]
fn test_override_socket_without_candidate_is_unresolved() {
    let report = resolve(&graph(vec![
        lib_with_overridable_cache(),
        module("app", vec![]).with_import(qn("lib")),
    ]));

    assert!(!report.has_errors());
    assert_eq!(outcome(&report, "lib:cache:override"), &ResolutionOutcome::Unresolved);
}

#[test]
fn test_override_of_container_bean_is_single() {
    let report = resolve(&graph(vec![
        module(
            "lib",
            vec![Bean::module_bean("handlers", list_of("app.Handler")).overridable()],
        ),
        module(
            "app",
            vec![
                Bean::module_bean("myHandlers", list_of("app.Handler")),
                leaf("h1", "app.Handler"),
                leaf("h2", "app.Handler"),
            ],
        )
        .with_import(qn("lib")),
    ]));

    assert!(!report.has_errors());
    let entry = report.plan.get(&qn("lib:handlers:override")).unwrap();
    assert_eq!(entry.multiplicity, Multiplicity::Single);
    assert_eq!(
        entry.outcome,
        ResolutionOutcome::ResolvedSingle {
            bean: qn("app:myHandlers"),
            mutation: None,
        }
    );
}

#[test]
fn test_override_of_container_bean_can_be_ambiguous() {
    let report = resolve(&graph(vec![
        module(
            "lib",
            vec![Bean::module_bean("handlers", list_of("app.Handler")).overridable()],
        ),
        module(
            "app",
            vec![
                Bean::module_bean("first", list_of("app.Handler")),
                Bean::module_bean("second", list_of("app.Handler")),
            ],
        )
        .with_import(qn("lib")),
    ]));

    assert!(report.has_errors());
    assert_eq!(count_id(&report, "WIRE002"), 1);
    assert!(matches!(
        outcome(&report, "lib:handlers:override"),
        ResolutionOutcome::Ambiguous { .. }
    ));
}

#[test]
fn test_unsupplied_override_of_container_bean_is_single() {
    let report = resolve(&graph(vec![module(
        "lib",
        vec![Bean::module_bean("handlers", list_of("app.Handler")).overridable()],
    )]));

    let entry = report.plan.get(&qn("lib:handlers:override")).unwrap();
    assert_eq!(entry.multiplicity, Multiplicity::Single);
    assert_eq!(entry.outcome, ResolutionOutcome::Unresolved);
}

#[test]
fn test_directive_may_target_imported_socket_bean() {
    let report = resolve(&graph(vec![
        lib_with_socket_bean(),
        module(
            "app",
            vec![leaf("primary", "app.DataSource"), leaf("replica", "app.DataSource")],
        )
        .with_import(qn("lib"))
        .with_directive(crate::test_utils::directive(&["app:replica"], "lib:dataSource")),
    ]));

    assert!(!report.has_errors());
    assert_eq!(
        outcome(&report, "lib:dataSource").resolved_beans(),
        &[qn("app:replica")]
    );
}

#[test]
fn test_directive_naming_private_bean_of_import() {
    let report = resolve(&graph(vec![
        module(
            "app",
            vec![bean(
                "service",
                "app.Service",
                vec![Socket::optional("store", ty("app.Store"))],
            )],
        )
        .with_import(qn("lib"))
        .with_directive(crate::test_utils::directive(&["lib:store"], "app:service:store")),
        module("lib", vec![leaf("store", "app.Store").private()]),
    ]));

    let errors: Vec<_> = report.diagnostics_with_id("WIRE003").collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("not visible from module app"));
}
