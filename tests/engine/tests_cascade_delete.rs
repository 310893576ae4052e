//! Cascading-delete correctness: after deleting an element, no surviving
//! element references anything in its owned subtree, and its notation is
//! gone from every diagram.

use easel::base::{ElementId, Point};
use easel::command::{
    AddShapeNotationCommand, CommandStack, CompoundCommand, CreateElementCommand, ElementHandle,
    SetReferenceCommand, UpdateAttributes,
};
use easel::metamodel::{all_features, ElementKind, FeatureId};
use easel::model::Document;
use easel::operation::{CommandProvider, NodeCommandProvider, ProviderContext};
use easel::Representation;

use crate::helpers::operation_fixtures::*;

#[test]
fn test_delete_clears_every_referrer_through_the_pipeline() {
    // P is referenced by a generalization owned by X and by a dependency;
    // C lives inside P. After deleting P: C is gone with it, both
    // references are cleared, and P's ID no longer resolves.
    let (session, classes) = session_with_classes(2);
    let p = classes[0].clone();
    let x = classes[1].clone();

    let c = created_id(&session.process(&create_node("class", Some("C"), Some(&p))).unwrap());
    let g = created_id(&session.process(&create_edge("generalization", &x, &p)).unwrap());
    let d = created_id(&session.process(&create_edge("dependency", &x, &p)).unwrap());

    let response = session.process(&remove("class", &p)).unwrap();
    assert!(response.removed.contains(&p));
    assert!(response.removed.contains(&c));

    session.with_document(|document| {
        assert!(document.resolve(&p).is_none());
        assert!(document.resolve(&c).is_none());
        assert!(document.is_retired(&p));

        // No surviving element still points at P.
        for element in document.iter_elements() {
            assert!(
                !element.references_target(&p),
                "{} still references the deleted element",
                element.id()
            );
        }
        // The referencing elements themselves survive, with cleared
        // fields.
        assert!(document.resolve(&g).is_some());
        assert!(document.resolve(&d).is_some());
        assert!(document.resolve(&d).unwrap().references_target(&x));

        // Notation for P is gone.
        assert!(!document.diagram(Representation::Class).unwrap().contains(&p));
    });
}

#[test]
fn test_delete_removes_notation_from_every_representation() {
    // An element projected into two diagrams loses both notations in the
    // same transaction, and a referrer known only to another diagram
    // kind's feature table is still cleaned up (global cleanup scope).
    let mut document = Document::new();
    let mut stack = CommandStack::new();
    let root = document.root().clone();

    let create = |kind: ElementKind, parent: &ElementId, stack: &mut CommandStack, document: &mut Document| {
        let handle = ElementHandle::deferred();
        let mut compound = CompoundCommand::new("fixture");
        compound.append(CreateElementCommand::new(
            parent.clone(),
            kind,
            UpdateAttributes::default(),
            handle.clone(),
        ));
        stack.execute(compound, document).unwrap();
        handle.get().unwrap()
    };

    let package = create(ElementKind::Package, &root, &mut stack, &mut document);
    let import = create(ElementKind::PackageImport, &root, &mut stack, &mut document);

    let imported = all_features()
        .iter()
        .copied()
        .find(|f| f.id == FeatureId::PackageImportImported)
        .unwrap();
    let mut wire = CompoundCommand::new("wire");
    wire.append(SetReferenceCommand::new(import.clone(), imported, package.clone()));
    wire.append(AddShapeNotationCommand::new(
        Representation::Class,
        ElementHandle::resolved(package.clone()),
        Some(Point::new(10.0, 10.0)),
        None,
    ));
    wire.append(AddShapeNotationCommand::new(
        Representation::Package,
        ElementHandle::resolved(package.clone()),
        Some(Point::new(30.0, 40.0)),
        None,
    ));
    stack.execute(wire, &mut document).unwrap();

    // Delete through the class-diagram provider; the package-import
    // feature belongs to the package diagram's table.
    let compound = NodeCommandProvider
        .delete_modifications(
            &ProviderContext {
                document: &document,
                representation: Representation::Class,
            },
            &package,
        )
        .unwrap();
    stack.execute(compound, &mut document).unwrap();

    assert!(document.resolve(&package).is_none());
    assert!(!document.diagram(Representation::Class).unwrap().contains(&package));
    assert!(!document.diagram(Representation::Package).unwrap().contains(&package));
    assert!(
        !document.resolve(&import).unwrap().references_target(&package),
        "cross-diagram referrer must be cleaned up"
    );
}

#[test]
fn test_deleting_a_subtree_cleans_references_to_descendants() {
    let (session, classes) = session_with_classes(1);
    let x = classes[0].clone();

    let p = created_id(&session.process(&create_node("package", Some("P"), None)).unwrap());
    let inner = created_id(&session.process(&create_node("class", Some("Inner"), Some(&p))).unwrap());
    let g = created_id(&session.process(&create_edge("generalization", &x, &inner)).unwrap());

    session.process(&remove("package", &p)).unwrap();

    session.with_document(|document| {
        assert!(document.resolve(&inner).is_none());
        let generalization = document.resolve(&g).expect("referrer survives");
        assert!(
            !generalization.references_target(&inner),
            "reference into the deleted subtree must be cleared"
        );
    });
}

#[test]
fn test_undo_of_delete_restores_references_and_notation() {
    let (session, classes) = session_with_classes(2);
    let p = classes[0].clone();
    let x = classes[1].clone();
    let g = created_id(&session.process(&create_edge("generalization", &x, &p)).unwrap());

    let before = session.with_document(|d| d.clone());
    session.process(&remove("class", &p)).unwrap();
    assert!(session.undo().unwrap());

    session.with_document(|after| {
        assert_eq!(*after, before, "undo restores the exact pre-delete state");
        assert!(after.resolve(&g).unwrap().references_target(&p));
    });
}
