//! Tests for the Bean Catalog

use crate::test_utils::{bean, graph, leaf, list_of, module, qn, ty};
use wireplan_domain::{
    Bean, KnownTypes, Mutator, NestedBean, Socket, TypeDescriptor, WiringGraph,
};
use wireplan_resolve::catalog::EntryKind;
use wireplan_resolve::{
    BeanCatalog, Diagnostic, Diagnostics, SocketOrigin, TypeHierarchy, TypeMatcher,
    WiringDiagnostic,
};

fn build(graph: &WiringGraph) -> (BeanCatalog, Vec<WiringDiagnostic>) {
    let matcher = TypeMatcher::new(TypeHierarchy::default(), KnownTypes::default());
    let diagnostics = Diagnostics::new();
    let catalog = BeanCatalog::build(graph, &matcher, &diagnostics);
    (catalog, diagnostics.into_sorted())
}

fn ids(diagnostics: &[WiringDiagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.id()).collect()
}

fn visible(catalog: &BeanCatalog, module: &str) -> Vec<String> {
    let module = catalog.module(&qn(module)).unwrap();
    catalog
        .visible_beans(module)
        .into_iter()
        .map(|id| catalog.bean(id).name.to_string())
        .collect()
}

#[test]
fn test_beans_and_sockets_get_qualified_names() {
    let (catalog, diagnostics) = build(&graph(vec![module(
        "app",
        vec![bean(
            "service",
            "app.Service",
            vec![Socket::required("store", ty("app.Store"))],
        )],
    )]));

    assert!(diagnostics.is_empty());
    let service = catalog.bean_by_name(&qn("app:service")).unwrap();
    assert_eq!(service.module, qn("app"));
    assert_eq!(service.kind, EntryKind::ModuleBean);

    let socket = catalog.socket_by_name(&qn("app:service:store")).unwrap();
    assert_eq!(socket.owner, service.id);
    assert_eq!(socket.origin, SocketOrigin::BeanSocket);
    assert!(!socket.is_external());
}

#[test]
fn test_duplicate_bean_keeps_first_declaration() {
    let (catalog, diagnostics) = build(&graph(vec![module(
        "app",
        vec![leaf("store", "app.Store"), leaf("store", "app.OtherStore")],
    )]));

    assert_eq!(ids(&diagnostics), vec!["WIRE008"]);
    assert_eq!(diagnostics[0].element(), &qn("app:store"));
    let store = catalog.bean_by_name(&qn("app:store")).unwrap();
    assert_eq!(store.exposed_type, ty("app.Store"));
    assert_eq!(catalog.beans().count(), 1);
}

#[test]
fn test_duplicate_module_is_reported() {
    let (catalog, diagnostics) = build(&graph(vec![
        module("app", vec![leaf("a", "app.A")]),
        module("app", vec![leaf("b", "app.B")]),
    ]));

    assert_eq!(ids(&diagnostics), vec!["WIRE008"]);
    assert!(catalog.bean_by_name(&qn("app:b")).is_none());
}

#[test]
fn test_illegal_bean_identifier_is_reported_on_module() {
    let (catalog, diagnostics) = build(&graph(vec![module(
        "app",
        vec![leaf("1store", "app.Store"), leaf("dotted.name", "app.Store")],
    )]));

    assert_eq!(ids(&diagnostics), vec!["WIRE009", "WIRE009"]);
    assert!(diagnostics.iter().all(|d| d.element() == &qn("app")));
    assert_eq!(catalog.beans().count(), 0);
}

#[test]
fn test_mutator_on_multi_socket_is_dropped() {
    let mutator = Mutator {
        input: ty("app.Handler"),
        output: ty("app.Wrapped"),
        required: false,
    };
    let (catalog, diagnostics) = build(&graph(vec![module(
        "app",
        vec![bean(
            "router",
            "app.Router",
            vec![Socket::required("handlers", list_of("app.Handler")).with_mutator(mutator)],
        )],
    )]));

    assert_eq!(ids(&diagnostics), vec!["WIRE009"]);
    let socket = catalog.socket_by_name(&qn("app:router:handlers")).unwrap();
    assert!(socket.socket.mutator.is_none());
}

#[test]
fn test_overridable_bean_gets_override_socket() {
    let (catalog, diagnostics) = build(&graph(vec![module(
        "lib",
        vec![leaf("cache", "app.Cache").overridable()],
    )]));

    assert!(diagnostics.is_empty());
    let socket = catalog.socket_by_name(&qn("lib:cache:override")).unwrap();
    assert_eq!(socket.origin, SocketOrigin::Override);
    assert!(socket.socket.optional);
    assert_eq!(socket.socket.required_type, ty("app.Cache"));
    assert!(socket.is_external());
}

#[test]
fn test_socket_bean_cannot_be_overridable() {
    let (catalog, diagnostics) = build(&graph(vec![module(
        "lib",
        vec![Bean::socket_bean(Socket::required("source", ty("app.DataSource"))).overridable()],
    )]));

    assert_eq!(ids(&diagnostics), vec!["WIRE009"]);
    let socket = catalog.socket_by_name(&qn("lib:source")).unwrap();
    assert_eq!(socket.origin, SocketOrigin::SocketBean);
    assert_eq!(
        catalog.bean_by_name(&qn("lib:source")).unwrap().kind,
        EntryKind::SocketBean
    );
}

#[test]
fn test_nested_beans_inherit_visibility() {
    let (catalog, _) = build(&graph(vec![module(
        "app",
        vec![leaf("factory", "app.Factory")
            .private()
            .with_nested(
                NestedBean::new("connection", ty("app.Connection"))
                    .with_nested(NestedBean::new("channel", ty("app.Channel"))),
            )],
    )]));

    let connection = catalog.bean_by_name(&qn("app:factory.connection")).unwrap();
    let channel = catalog.bean_by_name(&qn("app:factory.connection.channel")).unwrap();
    assert!(!connection.exported);
    assert!(!channel.exported);
    assert_eq!(channel.kind, EntryKind::Nested { parent: connection.id });
}

#[test]
fn test_unresolved_bean_type_is_a_warning() {
    let (_, diagnostics) = build(&graph(vec![module(
        "app",
        vec![Bean::module_bean("store", TypeDescriptor::unresolved("Missing"))],
    )]));

    assert_eq!(ids(&diagnostics), vec!["WIRE007"]);
    assert!(!diagnostics[0].is_error());
}

#[test]
fn test_visible_beans_include_exported_beans_of_imports() {
    let (catalog, _) = build(&graph(vec![
        module("app", vec![leaf("service", "app.Service")]).with_import(qn("lib")),
        module(
            "lib",
            vec![
                leaf("store", "app.Store").with_nested(NestedBean::new("reader", ty("app.Reader"))),
                leaf("secret", "app.Secret").private(),
                Bean::socket_bean(Socket::required("source", ty("app.DataSource"))),
            ],
        ),
    ]));

    assert_eq!(
        visible(&catalog, "app"),
        vec!["app:service", "lib:store", "lib:store.reader"]
    );
    assert_eq!(
        visible(&catalog, "lib"),
        vec!["lib:secret", "lib:source", "lib:store", "lib:store.reader"]
    );
}

#[test]
fn test_external_sockets_of_module() {
    let (catalog, _) = build(&graph(vec![module(
        "lib",
        vec![
            Bean::socket_bean(Socket::required("source", ty("app.DataSource"))),
            bean(
                "repository",
                "app.Repository",
                vec![Socket::required("source", ty("app.DataSource"))],
            )
            .overridable(),
        ],
    )]));

    let module = catalog.module(&qn("lib")).unwrap();
    let external: Vec<String> = catalog
        .external_sockets(module)
        .map(|socket| socket.name.to_string())
        .collect();
    assert_eq!(external, vec!["lib:source", "lib:repository:override"]);
}
