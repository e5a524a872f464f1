use locator_core::edge::{ConnectionSpec, EdgeCatalog};
use locator_core::error::{LocateError, SelectorError};
use locator_core::locator::ResolutionMode;
use locator_core::schema;
use locator_core::selector::SelectorOperator;
use tempfile::TempDir;

const SERVICE_TO_POD: &str = r#"{
    "start": {
        "target": {"apiVersion": "v1", "kind": "Service"},
        "selector": {
            "matchLabels": {"team": "payments"},
            "matchExpressions": [{"key": "tier", "operator": "In", "values": ["frontend", "edge"]}]
        },
        "nameTemplate": "ignored-while-selector-present"
    },
    "path": ["service-pods"],
    "edges": [
        {
            "name": "service-pods",
            "src": {"apiVersion": "v1", "kind": "Service"},
            "dst": {"apiVersion": "v1", "kind": "Pod"},
            "connection": {"type": "MatchSelector", "selectorPath": "spec.selector"}
        },
        {
            "name": "pod-owner",
            "src": {"apiVersion": "v1", "kind": "Pod"},
            "dst": {"apiVersion": "apps/v1", "kind": "ReplicaSet"},
            "connection": {"type": "OwnedBy"}
        }
    ]
}"#;

#[test]
fn test_load_from_disk_and_validate() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("locator.json");
    std::fs::write(&path, SERVICE_TO_POD).unwrap();

    let locator = schema::load(&path).unwrap();
    schema::validate(&locator).unwrap();

    let Some(ResolutionMode::BySelector(selector)) = locator.start.mode() else {
        panic!("selector should take precedence over the name template");
    };
    assert_eq!(
        selector.match_expressions[0].operator,
        SelectorOperator::In
    );
    assert_eq!(
        selector.to_selector().unwrap().to_string(),
        "team=payments,tier in (edge,frontend)"
    );

    let catalog = EdgeCatalog::build(&locator.edges).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("pod-owner").unwrap().connection,
        ConnectionSpec::OwnedBy
    );
}

#[test]
fn test_unused_edges_must_still_be_valid() {
    let mut locator = schema::from_json(SERVICE_TO_POD).unwrap();
    locator.edges[1].dst = locator.edges[1].src.clone();
    let err = schema::validate(&locator).unwrap_err();
    assert!(matches!(err, LocateError::InvalidEdge { edge, .. } if edge == "pod-owner"));
}

#[test]
fn test_malformed_selector_is_rejected() {
    let mut locator = schema::from_json(SERVICE_TO_POD).unwrap();
    if let Some(selector) = locator.start.selector.as_mut() {
        selector.match_expressions[0].values.clear();
    }
    let err = schema::validate(&locator).unwrap_err();
    assert!(matches!(
        err,
        LocateError::InvalidSelector(SelectorError::MissingValues { .. })
    ));
}

#[test]
fn test_empty_selector_falls_back_to_name_template() {
    let mut locator = schema::from_json(SERVICE_TO_POD).unwrap();
    locator.start.selector = Some(Default::default());
    assert_eq!(
        locator.start.mode(),
        Some(ResolutionMode::ByName("ignored-while-selector-present"))
    );

    locator.start.name_template = "  ".into();
    assert_eq!(
        schema::validate(&locator).unwrap_err(),
        LocateError::MissingRootCriterion
    );
}
