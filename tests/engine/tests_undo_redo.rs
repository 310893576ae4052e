//! Undo/redo through the session, and ID stability across the history.

use easel::session::EditorSession;
use easel::Representation;

use crate::helpers::operation_fixtures::*;

#[test]
fn test_undo_and_redo_a_create() {
    let session = EditorSession::new(Representation::Class);
    let id = created_id(&session.process(&create_node("class", Some("A"), None)).unwrap());

    assert!(session.undo().unwrap());
    session.with_document(|d| assert!(d.resolve(&id).is_none()));

    assert!(session.redo().unwrap());
    session.with_document(|d| {
        assert!(
            d.resolve(&id).is_some(),
            "redo restores the element under its original ID"
        );
    });
}

#[test]
fn test_nothing_to_undo() {
    let session = EditorSession::new(Representation::Class);
    assert!(!session.undo().unwrap());
    assert!(!session.redo().unwrap());
}

#[test]
fn test_ids_are_never_reused_within_a_session() {
    // Create A, delete A, create B: B gets a fresh ID.
    let session = EditorSession::new(Representation::Class);
    let a = created_id(&session.process(&create_node("class", Some("A"), None)).unwrap());
    session.process(&remove("class", &a)).unwrap();
    let b = created_id(&session.process(&create_node("class", Some("B"), None)).unwrap());

    assert_ne!(a, b);
    session.with_document(|d| {
        assert!(d.resolve(&a).is_none());
        assert!(d.is_retired(&a));
        assert!(d.resolve(&b).is_some());
    });
}

#[test]
fn test_undo_history_is_cleared_by_new_operations() {
    let session = EditorSession::new(Representation::Class);
    let a = created_id(&session.process(&create_node("class", Some("A"), None)).unwrap());
    session.undo().unwrap();

    // A new operation forks the timeline; the undone create is gone.
    session.process(&create_node("class", Some("B"), None)).unwrap();
    assert!(!session.redo().unwrap());
    session.with_document(|d| assert!(d.resolve(&a).is_none()));
}

#[test]
fn test_undo_of_update_restores_attributes() {
    let (session, classes) = session_with_classes(1);
    session
        .process(&update(
            "class",
            &classes[0],
            &[("name", "Renamed"), ("is_abstract", "true")],
        ))
        .unwrap();

    session.undo().unwrap();
    session.with_document(|d| {
        let element = d.resolve(&classes[0]).unwrap();
        assert_eq!(element.name, "Class0");
        assert!(!element.is_abstract);
    });
}

#[test]
fn test_closed_session_rejects_undo() {
    let (session, _) = session_with_classes(1);
    session.close();
    assert!(session.undo().is_err());
    assert!(session.redo().is_err());
}
