//! Tests for beans, sockets and selectors

use wireplan_domain::entities::CompiledSelector;
use wireplan_domain::{
    Bean, BeanFacts, BeanPredicate, Module, Mutator, QualifiedName, Selector, Socket, Strategy,
    TypeDescriptor, Visibility,
};

fn ty(name: &str) -> TypeDescriptor {
    TypeDescriptor::named(name)
}

fn mutator(required: bool) -> Mutator {
    Mutator {
        input: ty("app.Raw"),
        output: ty("app.Cooked"),
        required,
    }
}

#[test]
fn test_socket_mandatory_rules() {
    assert!(Socket::required("store", ty("app.Store")).is_mandatory());
    assert!(!Socket::optional("store", ty("app.Store")).is_mandatory());
    assert!(!Socket::optional("store", ty("app.Store"))
        .with_mutator(mutator(false))
        .is_mandatory());
    assert!(Socket::optional("store", ty("app.Store"))
        .with_mutator(mutator(true))
        .is_mandatory());
}

#[test]
fn test_mutator_changes_matched_and_provided_types() {
    let socket = Socket::required("store", ty("app.Store"));
    assert_eq!(socket.matched_type(), &ty("app.Store"));
    assert_eq!(socket.provided_type(), &ty("app.Store"));

    let mutated = socket.with_mutator(mutator(false));
    assert_eq!(mutated.matched_type(), &ty("app.Raw"));
    assert_eq!(mutated.provided_type(), &ty("app.Cooked"));
}

#[test]
fn test_module_bean_builders() {
    let bean = Bean::module_bean("store", ty("app.Store"))
        .with_socket(Socket::required("url", ty("java.lang.String")))
        .with_annotation("Primary")
        .private()
        .prototype();

    assert_eq!(bean.visibility, Visibility::Private);
    assert_eq!(bean.strategy, Strategy::Prototype);
    assert_eq!(bean.sockets().len(), 1);
    assert_eq!(bean.exposed_type(), &ty("app.Store"));
    assert!(!bean.is_public());
    assert!(!bean.is_socket_bean());
    assert!(bean.as_socket().is_none());
}

#[test]
fn test_socket_bean_exposes_provided_type() {
    let bean = Bean::socket_bean(Socket::required("source", ty("app.Raw")).with_mutator(mutator(false)))
        .with_socket(Socket::required("ignored", ty("app.Other")));

    assert_eq!(bean.name, "source");
    assert!(bean.is_socket_bean());
    assert!(bean.sockets().is_empty());
    assert_eq!(bean.exposed_type(), &ty("app.Cooked"));

    let module = Module::new("lib".parse().unwrap())
        .with_bean(bean)
        .with_bean(Bean::module_bean("store", ty("app.Store")));
    assert_eq!(module.socket_beans().count(), 1);
}

#[derive(Debug)]
struct EndsWith(&'static str);

impl BeanPredicate for EndsWith {
    fn name(&self) -> &str {
        "ends-with"
    }

    fn matches(&self, bean: &BeanFacts<'_>) -> bool {
        bean.name.as_str().ends_with(self.0)
    }
}

#[test]
fn test_selectors_evaluate_bean_facts() {
    let name: QualifiedName = "app:primaryStore".parse().unwrap();
    let exposed = ty("app.Store");
    let annotations = vec!["Primary".to_string()];
    let facts = BeanFacts {
        name: &name,
        exposed_type: &exposed,
        annotations: &annotations,
    };

    let compiled: Vec<CompiledSelector> = [
        Selector::annotated("Primary"),
        Selector::name_matches("primary"),
        Selector::custom(EndsWith("Store")),
    ]
    .iter()
    .map(|selector| selector.compile().unwrap())
    .collect();
    assert!(compiled.iter().all(|selector| selector.matches(&facts)));

    assert!(!Selector::annotated("Secondary").compile().unwrap().matches(&facts));
    assert!(!Selector::name_matches("^lib:").compile().unwrap().matches(&facts));
}

#[test]
fn test_invalid_name_pattern_fails_to_compile() {
    assert!(Selector::name_matches("(unclosed").compile().is_err());
}

#[test]
fn test_selector_display() {
    assert_eq!(Selector::annotated("Primary").to_string(), "@Primary");
    assert_eq!(Selector::name_matches("^app:").to_string(), "name ~ /^app:/");
    assert_eq!(Selector::custom(EndsWith("x")).to_string(), "ends-with");
}
