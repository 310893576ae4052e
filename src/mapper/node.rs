//! The outbound graphical form.

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

use crate::base::{Dimension, ElementId, Point};

/// A node of the graphical projection returned to clients.
///
/// Keyed by the same stable ID space as the semantic model; synthetic
/// sub-nodes (headers, compartments, labels) derive their IDs from the
/// owning element's ID. Mapping the same element twice with no mutation
/// in between yields structurally equal nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphicalNode {
    pub id: ElementId,
    /// Graphical type identifier, prefixed by the representation,
    /// e.g. `class:node:interface` or `usecase:edge:include`.
    #[serde(rename = "type")]
    pub gtype: SmolStr,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GraphicalNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Dimension>,
    /// Renderer hints and edge endpoints.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub args: IndexMap<SmolStr, String>,
}

impl GraphicalNode {
    pub fn new(id: ElementId, gtype: impl Into<SmolStr>) -> Self {
        Self {
            id,
            gtype: gtype.into(),
            children: Vec::new(),
            position: None,
            size: None,
            args: IndexMap::new(),
        }
    }

    /// Derive a synthetic child ID, e.g. `{parent}_header`.
    pub fn child_id(&self, suffix: &str) -> ElementId {
        ElementId::new(format!("{}_{suffix}", self.id))
    }

    pub fn with_arg(mut self, key: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn push_child(&mut self, child: GraphicalNode) {
        self.children.push(child);
    }
}
