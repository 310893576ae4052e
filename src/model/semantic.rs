//! Semantic elements: typed nodes in the domain graph.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::ElementId;
use crate::metamodel::{ElementKind, FeatureId, Multiplicity, ReferenceFeature};

/// The value of one reference feature on one element.
///
/// References are non-owning: they never keep the target alive and may
/// form cycles. Ownership lives exclusively in the children tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceValue {
    Single(Option<ElementId>),
    Many(Vec<ElementId>),
}

impl ReferenceValue {
    /// Empty value for a feature of the given multiplicity.
    pub fn empty(multiplicity: Multiplicity) -> Self {
        match multiplicity {
            Multiplicity::Single => ReferenceValue::Single(None),
            Multiplicity::Many => ReferenceValue::Many(Vec::new()),
        }
    }

    /// Whether `target` appears in this value.
    pub fn contains(&self, target: &ElementId) -> bool {
        match self {
            ReferenceValue::Single(value) => value.as_ref() == Some(target),
            ReferenceValue::Many(values) => values.contains(target),
        }
    }
}

/// A typed node in the semantic graph.
///
/// The ID is assigned exactly once, when the element enters the document,
/// and identifies the element for its whole lifetime — including in the
/// graphical projection returned to clients.
#[derive(Clone, Debug, PartialEq)]
pub struct SemanticElement {
    id: ElementId,
    pub kind: ElementKind,
    pub name: SmolStr,
    pub is_abstract: bool,
    /// Free-form string properties not modeled as dedicated fields.
    pub properties: IndexMap<SmolStr, String>,
    /// Owning parent; `None` only for the document root.
    pub parent: Option<ElementId>,
    /// Owned children, in insertion order. Tree edges are acyclic.
    pub children: Vec<ElementId>,
    /// Reference fields, keyed by feature.
    pub references: IndexMap<FeatureId, ReferenceValue>,
}

impl SemanticElement {
    pub(crate) fn new(id: ElementId, kind: ElementKind, parent: Option<ElementId>) -> Self {
        Self {
            id,
            kind,
            name: SmolStr::new(kind.display_label()),
            is_abstract: false,
            properties: IndexMap::new(),
            parent,
            children: Vec::new(),
            references: IndexMap::new(),
        }
    }

    /// The element's stable ID. Calling this twice always returns the same
    /// value; IDs survive renames and reparenting.
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Current value of `feature`, or an empty value if never set.
    pub fn reference(&self, feature: &ReferenceFeature) -> ReferenceValue {
        self.references
            .get(&feature.id)
            .cloned()
            .unwrap_or_else(|| ReferenceValue::empty(feature.multiplicity))
    }

    /// Whether any reference field on this element points at `target`.
    pub fn references_target(&self, target: &ElementId) -> bool {
        self.references.values().any(|value| value.contains(target))
    }
}
