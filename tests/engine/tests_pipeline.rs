//! End-to-end operation pipeline tests:
//! decode → dispatch → compose → apply → map.

use rstest::rstest;

use easel::session::EditorSession;
use easel::operation::RequestOperation;
use easel::metamodel::ElementKind;
use easel::Representation;

use crate::helpers::operation_fixtures::*;

#[test]
fn test_create_container_and_child_with_defaults() {
    // Create container P, then child C with name="Foo" and is_abstract
    // absent: C.name == "Foo", C.is_abstract == false.
    let session = EditorSession::new(Representation::Class);

    let p = created_id(
        &session
            .process(&create_node("package", Some("P"), None))
            .unwrap(),
    );
    let c = created_id(
        &session
            .process(&create_node("class", Some("Foo"), Some(&p)))
            .unwrap(),
    );

    session.with_document(|document| {
        let child = document.resolve(&c).expect("child exists");
        assert_eq!(child.name, "Foo");
        assert!(!child.is_abstract);
        assert_eq!(child.parent.as_ref(), Some(&p));
        assert!(document.resolve(&p).unwrap().children.contains(&c));
    });
}

#[rstest]
#[case("package", "Package")]
#[case("class", "Class")]
#[case("interface", "Interface")]
#[case("enumeration", "Enumeration")]
fn test_create_without_name_uses_display_label(#[case] kind: &str, #[case] expected: &str) {
    let session = EditorSession::new(Representation::Class);
    let id = created_id(&session.process(&create_node(kind, None, None)).unwrap());
    session.with_document(|document| {
        let element = document.resolve(&id).unwrap();
        assert_eq!(element.name, expected);
        assert_eq!(element.kind.type_id(), kind);
    });
}

#[test]
fn test_create_parses_is_abstract() {
    let session = EditorSession::new(Representation::Class);
    let mut operation = create_node("class", Some("Shape"), None);
    operation
        .properties
        .insert("is_abstract".into(), "true".into());
    let id = created_id(&session.process(&operation).unwrap());
    session.with_document(|document| {
        assert!(document.resolve(&id).unwrap().is_abstract);
    });
}

#[test]
fn test_update_renames_element() {
    let (session, classes) = session_with_classes(1);
    let response = session
        .process(&update("class", &classes[0], &[("name", "Customer")]))
        .unwrap();

    assert_eq!(response.nodes.len(), 1);
    assert_eq!(
        response.nodes[0].children[0].args.get("text").unwrap(),
        "Customer"
    );
    session.with_document(|document| {
        assert_eq!(document.resolve(&classes[0]).unwrap().name, "Customer");
    });
}

#[test]
fn test_unknown_operation_is_rejected_without_side_effects() {
    let (session, _) = session_with_classes(1);
    let before = session.with_document(|d| d.clone());

    let operation = RequestOperation {
        op_type: "teleport_class".into(),
        ..RequestOperation::default()
    };
    let error = session.process(&operation).expect_err("must reject");
    assert_eq!(error.kind(), "decode_error");

    session.with_document(|after| assert_eq!(*after, before));
}

#[test]
fn test_unknown_kind_for_representation_is_rejected() {
    // A sequence-diagram-only kind dispatched into a class session.
    let session = EditorSession::new(Representation::Class);
    let error = session
        .process(&create_node("lifeline", None, None))
        .expect_err("no lifeline provider in class representation");
    assert_eq!(error.kind(), "unknown_type");
    session.with_document(|document| assert_eq!(document.len(), 1));
}

#[test]
fn test_malformed_flag_is_a_decode_error() {
    let session = EditorSession::new(Representation::Class);
    let mut operation = create_node("class", None, None);
    operation
        .properties
        .insert("is_abstract".into(), "maybe".into());
    let error = session.process(&operation).expect_err("must reject");
    assert_eq!(error.kind(), "decode_error");
}

#[test]
fn test_stale_edge_endpoint_degrades_to_noop() {
    let (session, classes) = session_with_classes(1);
    let before = session.with_document(|d| d.len());

    let mut operation = create_edge("generalization", &classes[0], &classes[0]);
    operation.target_id = Some("already-gone".into());

    // The operation applies as a no-op instead of failing hard; the
    // response carries nothing because nothing was created.
    let response = session.process(&operation).unwrap();
    assert!(response.nodes.is_empty());
    assert!(response.removed.is_empty());
    assert_eq!(session.with_document(|d| d.len()), before);
}

#[test]
fn test_create_edge_wires_references_and_notation() {
    let (session, classes) = session_with_classes(2);
    let response = session
        .process(&create_edge("generalization", &classes[0], &classes[1]))
        .unwrap();

    let edge = &response.nodes[0];
    assert_eq!(edge.gtype, "class:edge:generalization");
    assert_eq!(edge.args.get("sourceId").unwrap(), classes[0].as_str());
    assert_eq!(edge.args.get("targetId").unwrap(), classes[1].as_str());

    let generalization = edge.id.clone();
    session.with_document(|document| {
        let element = document.resolve(&generalization).unwrap();
        assert_eq!(element.kind, ElementKind::Generalization);
        // Owned by its source classifier.
        assert_eq!(element.parent.as_ref(), Some(&classes[0]));
        assert!(element.references_target(&classes[1]));
        assert!(document
            .diagram(Representation::Class)
            .unwrap()
            .contains(&generalization));
    });
}

#[test]
fn test_update_renames_an_edge_element() {
    let (session, classes) = session_with_classes(2);
    let generalization = created_id(
        &session
            .process(&create_edge("generalization", &classes[0], &classes[1]))
            .unwrap(),
    );

    let response = session
        .process(&update("generalization", &generalization, &[("name", "inherits")]))
        .unwrap();
    assert_eq!(response.nodes[0].args.get("label").unwrap(), "inherits");
}

#[test]
fn test_dependency_is_owned_by_the_container() {
    let (session, classes) = session_with_classes(2);
    let response = session
        .process(&create_edge("dependency", &classes[0], &classes[1]))
        .unwrap();
    let dependency = response.nodes[0].id.clone();

    session.with_document(|document| {
        let element = document.resolve(&dependency).unwrap();
        assert_eq!(element.parent.as_ref(), Some(document.root()));
        assert!(element.references_target(&classes[0]));
        assert!(element.references_target(&classes[1]));
    });
}
