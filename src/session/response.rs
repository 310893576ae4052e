//! The outbound result of a processed operation.

use serde::Serialize;

use crate::base::{ElementId, Representation};
use crate::mapper::GraphicalNode;

/// What the client gets back after an operation applies.
///
/// Created and updated elements come back re-projected through the mapper
/// registry; deletions report the IDs that left the document (the whole
/// owned subtree, not just the operation's target).
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub representation: Representation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<GraphicalNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<ElementId>,
}

impl EditResponse {
    pub(crate) fn empty(representation: Representation) -> Self {
        Self {
            representation,
            nodes: Vec::new(),
            removed: Vec::new(),
        }
    }
}
