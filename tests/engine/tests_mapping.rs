//! Read-side mapping: determinism, batch ordering, and failure surfacing.

use easel::command::{CommandStack, CompoundCommand, CreateElementCommand, ElementHandle, UpdateAttributes};
use easel::mapper::{MapperError, MapperRegistry};
use easel::metamodel::ElementKind;
use easel::model::Document;
use easel::Representation;

use crate::helpers::operation_fixtures::*;

fn document_with(kinds: &[ElementKind]) -> (Document, Vec<easel::ElementId>) {
    let mut document = Document::new();
    let mut stack = CommandStack::new();
    let root = document.root().clone();
    let ids = kinds
        .iter()
        .map(|kind| {
            let handle = ElementHandle::deferred();
            let mut compound = CompoundCommand::new("fixture");
            compound.append(CreateElementCommand::new(
                root.clone(),
                *kind,
                UpdateAttributes::default(),
                handle.clone(),
            ));
            stack.execute(compound, &mut document).unwrap();
            handle.get().unwrap()
        })
        .collect();
    (document, ids)
}

#[test]
fn test_mapping_twice_is_structurally_equal() {
    let (session, classes) = session_with_classes(1);
    let first = session.map_element(&classes[0]).unwrap();
    let second = session.map_element(&classes[0]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_map_many_preserves_order() {
    let (document, ids) = document_with(&[
        ElementKind::Class,
        ElementKind::Interface,
        ElementKind::Enumeration,
    ]);
    let registry = MapperRegistry::with_defaults();

    let nodes = registry
        .map_many(&document, Representation::Class, &ids)
        .unwrap();
    let mapped: Vec<_> = nodes.iter().map(|n| n.id.clone()).collect();
    assert_eq!(mapped, ids);
}

#[test]
fn test_map_many_surfaces_the_failing_element() {
    // A lifeline has no mapper in the class representation; the batch
    // error names exactly that element.
    let (document, ids) = document_with(&[ElementKind::Class, ElementKind::Lifeline]);
    let registry = MapperRegistry::with_defaults();

    let error = registry
        .map_many(&document, Representation::Class, &ids)
        .expect_err("lifeline is unmappable here");
    match error {
        MapperError::MapFailed { element, source } => {
            assert_eq!(element, ids[1]);
            assert!(matches!(
                *source,
                MapperError::NoMapperFound {
                    kind: ElementKind::Lifeline,
                    ..
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_mapping_failure_leaves_the_document_untouched() {
    let (document, ids) = document_with(&[ElementKind::Lifeline]);
    let snapshot = document.clone();
    let registry = MapperRegistry::with_defaults();

    let _ = registry
        .map(&document, Representation::Class, &ids[0])
        .expect_err("no mapper");
    assert_eq!(document, snapshot);
}

#[test]
fn test_mapped_geometry_comes_from_notation() {
    let (session, _) = session_with_classes(0);
    let mut operation = create_node("class", Some("Placed"), None);
    operation.location = Some(easel::Point::new(42.0, 17.0));
    let response = session.process(&operation).unwrap();

    let node = &response.nodes[0];
    assert_eq!(node.position, Some(easel::Point::new(42.0, 17.0)));
    assert_eq!(node.size, Some(ElementKind::Class.default_size()));
}
