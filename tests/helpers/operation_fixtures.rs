//! Builders for inbound operations and common session setups.

use easel::base::ElementId;
use easel::operation::RequestOperation;
use easel::session::{EditResponse, EditorSession};
use easel::Representation;

/// A `create_node` operation for `kind`, optionally named, optionally
/// targeted at a container.
pub fn create_node(kind: &str, name: Option<&str>, container: Option<&ElementId>) -> RequestOperation {
    let mut operation = RequestOperation {
        op_type: "create_node".into(),
        ..RequestOperation::default()
    };
    operation
        .properties
        .insert("element_kind".into(), kind.into());
    if let Some(name) = name {
        operation.properties.insert("name".into(), name.into());
    }
    operation.container_id = container.map(|id| id.to_string());
    operation
}

/// A `create_edge` operation between two resolved elements.
pub fn create_edge(kind: &str, source: &ElementId, target: &ElementId) -> RequestOperation {
    let mut operation = RequestOperation {
        op_type: "create_edge".into(),
        ..RequestOperation::default()
    };
    operation
        .properties
        .insert("element_kind".into(), kind.into());
    operation.source_id = Some(source.to_string());
    operation.target_id = Some(target.to_string());
    operation
}

/// An `update_<kind>` operation carrying the given properties.
pub fn update(kind: &str, element: &ElementId, pairs: &[(&str, &str)]) -> RequestOperation {
    let mut operation = RequestOperation {
        op_type: format!("update_{kind}"),
        element_id: Some(element.to_string()),
        ..RequestOperation::default()
    };
    for (key, value) in pairs {
        operation
            .properties
            .insert((*key).to_string(), (*value).to_string());
    }
    operation
}

/// A `<kind>:remove_<kind>` operation.
pub fn remove(kind: &str, element: &ElementId) -> RequestOperation {
    RequestOperation {
        op_type: format!("{kind}:remove_{kind}"),
        element_id: Some(element.to_string()),
        ..RequestOperation::default()
    }
}

/// The created element's ID out of a create response.
pub fn created_id(response: &EditResponse) -> ElementId {
    response
        .nodes
        .first()
        .expect("create response carries the new node")
        .id
        .clone()
}

/// A class-diagram session with `count` classes created through the
/// pipeline. Returns the session and the class IDs.
pub fn session_with_classes(count: usize) -> (EditorSession, Vec<ElementId>) {
    let session = EditorSession::new(Representation::Class);
    let classes = (0..count)
        .map(|i| {
            let response = session
                .process(&create_node("class", Some(&format!("Class{i}")), None))
                .expect("create class");
            created_id(&response)
        })
        .collect();
    (session, classes)
}
