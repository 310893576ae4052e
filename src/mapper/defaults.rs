//! Built-in mappers for the default vocabulary.
//!
//! Nodes are built as a header label plus, for container-like kinds, a
//! body compartment holding the mapped children. Edges carry their
//! resolved endpoint IDs as arguments. Synthetic sub-node IDs derive from
//! the owning element's ID, so repeated mapping is deterministic.

use crate::base::Representation;
use crate::metamodel::{edge_kinds, node_kinds, ElementKind, FeatureId};
use crate::model::{ReferenceValue, SemanticElement};

use super::node::GraphicalNode;
use super::registry::{MapContext, Mapper, MapperError, MapperRegistry};

fn has_body(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Package
            | ElementKind::Class
            | ElementKind::Interface
            | ElementKind::Enumeration
            | ElementKind::Interaction
            | ElementKind::StateMachine
    )
}

/// Shape builder shared by every node kind in the default vocabulary.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultNodeMapper;

impl Mapper for DefaultNodeMapper {
    fn map(
        &self,
        ctx: &MapContext<'_>,
        element: &SemanticElement,
    ) -> Result<GraphicalNode, MapperError> {
        let prefix = ctx.representation.prefix();
        let mut node = GraphicalNode::new(
            element.id().clone(),
            format!("{prefix}:node:{}", element.kind.type_id()),
        );

        let mut header = GraphicalNode::new(
            node.child_id("header"),
            format!("{prefix}:label:name"),
        )
        .with_arg("text", element.name.as_str());
        if element.is_abstract {
            header = header.with_arg("italic", "true");
        }
        node.push_child(header);

        if has_body(element.kind) {
            let mut body =
                GraphicalNode::new(node.child_id("body"), format!("{prefix}:comp:body"));
            for child in &element.children {
                // Relationship children render at diagram level, not
                // inside compartments.
                if ctx.document.element(child)?.kind.is_edge() {
                    continue;
                }
                if let Some(mapped) = ctx.map_child(child)? {
                    body.push_child(mapped);
                }
            }
            node.push_child(body);
        }
        Ok(node)
    }
}

/// Edge builder shared by every relationship kind in the default
/// vocabulary.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultEdgeMapper;

impl DefaultEdgeMapper {
    /// Resolve the rendered endpoints of a relationship element.
    ///
    /// Relationship elements owned by their source (generalizations,
    /// includes, extends, package imports) use the owner as source; the
    /// rest read both ends from reference features. Either endpoint may
    /// be absent after cross-reference cleanup.
    fn endpoints(element: &SemanticElement) -> (Option<ReferenceValue>, Option<ReferenceValue>) {
        let owner = element
            .parent
            .clone()
            .map(|parent| ReferenceValue::Single(Some(parent)));
        let single = |id: FeatureId| element.references.get(&id).cloned();

        match element.kind {
            ElementKind::Generalization => (owner, single(FeatureId::GeneralizationGeneral)),
            ElementKind::Include => (owner, single(FeatureId::IncludeAddition)),
            ElementKind::Extend => (owner, single(FeatureId::ExtendExtendedCase)),
            ElementKind::PackageImport => (owner, single(FeatureId::PackageImportImported)),
            ElementKind::Association => {
                let ends = single(FeatureId::AssociationEnds);
                (ends.clone(), ends)
            }
            ElementKind::Dependency => (
                single(FeatureId::DependencyClient),
                single(FeatureId::DependencySupplier),
            ),
            ElementKind::Message => (
                single(FeatureId::MessageSource),
                single(FeatureId::MessageTarget),
            ),
            ElementKind::Transition => (
                single(FeatureId::TransitionSource),
                single(FeatureId::TransitionTarget),
            ),
            _ => (None, None),
        }
    }

    fn nth(value: Option<ReferenceValue>, index: usize) -> Option<String> {
        match value {
            Some(ReferenceValue::Single(id)) => id.map(|id| id.to_string()),
            Some(ReferenceValue::Many(ids)) => ids.get(index).map(|id| id.to_string()),
            None => None,
        }
    }
}

impl Mapper for DefaultEdgeMapper {
    fn map(
        &self,
        ctx: &MapContext<'_>,
        element: &SemanticElement,
    ) -> Result<GraphicalNode, MapperError> {
        let prefix = ctx.representation.prefix();
        let mut node = GraphicalNode::new(
            element.id().clone(),
            format!("{prefix}:edge:{}", element.kind.type_id()),
        );

        let (source, target) = Self::endpoints(element);
        let target_index = usize::from(element.kind == ElementKind::Association);
        if let Some(source) = Self::nth(source, 0) {
            node = node.with_arg("sourceId", source);
        }
        if let Some(target) = Self::nth(target, target_index) {
            node = node.with_arg("targetId", target);
        }
        if !element.name.is_empty() {
            node = node.with_arg("label", element.name.as_str());
        }
        Ok(node)
    }
}

impl MapperRegistry {
    /// A registry with every (representation, kind) pair of the default
    /// vocabulary wired to the default builders.
    pub fn with_defaults() -> Self {
        let mut registry = MapperRegistry::new();
        for representation in Representation::ALL {
            for kind in node_kinds(representation) {
                registry
                    .register(representation, *kind, DefaultNodeMapper)
                    .expect("default node vocabulary has no duplicates");
            }
            for kind in edge_kinds(representation) {
                registry
                    .register(representation, *kind, DefaultEdgeMapper)
                    .expect("default edge vocabulary has no duplicates");
            }
        }
        registry
    }
}
