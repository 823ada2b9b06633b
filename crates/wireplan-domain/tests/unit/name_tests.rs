//! Tests for qualified names

use wireplan_domain::{NameKind, QualifiedName};

#[test]
fn test_parse_module_bean_and_socket_names() {
    let module: QualifiedName = "com.example.app".parse().unwrap();
    let bean: QualifiedName = "com.example.app:dataSource".parse().unwrap();
    let socket: QualifiedName = "com.example.app:dataSource:url".parse().unwrap();

    assert_eq!(module.kind(), NameKind::Module);
    assert_eq!(bean.kind(), NameKind::Bean);
    assert_eq!(socket.kind(), NameKind::Socket);

    assert_eq!(socket.module_name(), "com.example.app");
    assert_eq!(socket.bean_name(), Some("dataSource"));
    assert_eq!(socket.socket_name(), Some("url"));
    assert_eq!(socket.module_qualified(), module);
    assert_eq!(socket.bean_qualified(), Some(bean.clone()));
    assert_eq!(module.bean_name(), None);
}

#[test]
fn test_builders_match_parsed_names() {
    let module = QualifiedName::module("app").unwrap();
    let bean = module.with_bean("store").unwrap();
    let socket = bean.with_socket("url").unwrap();

    assert_eq!(bean, QualifiedName::bean("app", "store").unwrap());
    assert_eq!(socket, QualifiedName::socket("app", "store", "url").unwrap());
    assert_eq!(socket.to_string(), "app:store:url");
}

#[test]
fn test_segments_must_follow_their_parent_kind() {
    let module = QualifiedName::module("app").unwrap();
    let socket = QualifiedName::socket("app", "store", "url").unwrap();

    assert!(module.with_socket("url").is_err());
    assert!(socket.with_bean("store").is_err());
    assert!(module.nested("pool").is_err());
}

#[test]
fn test_illegal_identifiers_are_rejected() {
    for input in ["", "1app", "app:", "app::url", "app:store-x", "a:b:c:d", "app:$ok:url x"] {
        assert!(input.parse::<QualifiedName>().is_err(), "accepted {input:?}");
    }
    assert!("$app:_store".parse::<QualifiedName>().is_ok());
}

#[test]
fn test_nested_bean_names() {
    let bean = QualifiedName::bean("app", "factory").unwrap();
    let nested = bean.nested("connection").unwrap();

    assert_eq!(nested.as_str(), "app:factory.connection");
    assert!(nested.is_nested());
    assert!(!bean.is_nested());
    assert_eq!(nested.kind(), NameKind::Bean);
    assert!(nested.nested("channel").unwrap().is_nested());
}

#[test]
fn test_belongs_to_compares_modules() {
    let module = QualifiedName::module("app").unwrap();
    let other = QualifiedName::module("app.core").unwrap();
    let socket = QualifiedName::socket("app", "store", "url").unwrap();

    assert!(socket.belongs_to(&module));
    assert!(!socket.belongs_to(&other));
}

#[test]
fn test_ordering_follows_string_form() {
    let mut names: Vec<QualifiedName> = ["app:b", "app:a.x", "app:a", "lib:a"]
        .iter()
        .map(|name| name.parse().unwrap())
        .collect();
    names.sort();
    let rendered: Vec<&str> = names.iter().map(QualifiedName::as_str).collect();
    assert_eq!(rendered, vec!["app:a", "app:a.x", "app:b", "lib:a"]);
}

#[test]
fn test_serde_uses_string_form() {
    let name = QualifiedName::socket("app", "store", "url").unwrap();
    let json = serde_json::to_string(&name).unwrap();
    assert_eq!(json, "\"app:store:url\"");

    let parsed: QualifiedName = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, name);
    assert!(serde_json::from_str::<QualifiedName>("\"app:1store\"").is_err());
}
