//! The document: semantic arena, notation diagrams, ID assignment.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::trace;

use crate::base::{Bounds, ElementId, Point, Representation};
use crate::metamodel::ElementKind;

use super::notation::{Diagram, NotationElement};
use super::semantic::SemanticElement;

/// Integrity errors raised by document mutation.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The ID does not resolve to a live element.
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// Reparenting would make an element its own ancestor.
    #[error("cyclic containment: {0} cannot own one of its ancestors")]
    CyclicContainment(ElementId),

    /// The document root cannot be detached.
    #[error("the document root cannot be detached")]
    RootDeletion,

    /// A (representation, semantic element) pair already has notation.
    #[error("duplicate notation for {element} in {representation} diagram")]
    DuplicateNotation {
        representation: Representation,
        element: ElementId,
    },

    /// Expected notation was not present.
    #[error("no notation for {element} in {representation} diagram")]
    MissingNotation {
        representation: Representation,
        element: ElementId,
    },
}

/// An owned subtree detached from the document by a delete, with enough
/// context to put it back exactly where it was.
#[derive(Debug)]
pub struct DetachedSubtree {
    pub(crate) parent: ElementId,
    /// Index the root held in its parent's children list.
    pub(crate) index: usize,
    /// Elements in preorder; the subtree root first.
    pub(crate) elements: Vec<SemanticElement>,
}

impl DetachedSubtree {
    /// IDs of every detached element, subtree root first.
    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.elements.iter().map(|e| e.id())
    }
}

/// One editing session's document.
#[derive(Clone, Debug)]
pub struct Document {
    root: ElementId,
    elements: IndexMap<ElementId, SemanticElement>,
    diagrams: IndexMap<Representation, Diagram>,
    /// IDs that have left the document and must never be minted again.
    retired: FxHashSet<ElementId>,
}

/// Equality covers the observable layers — the semantic graph and the
/// notation diagrams. The retired-ID set is allocator bookkeeping: a
/// rolled-back transaction may grow it without the document having
/// observably changed.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.elements == other.elements
            && self.diagrams == other.diagrams
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with a fresh root element of kind
    /// [`ElementKind::Model`].
    pub fn new() -> Self {
        let id = ElementId::generate();
        let mut elements = IndexMap::new();
        elements.insert(id.clone(), SemanticElement::new(id.clone(), ElementKind::Model, None));
        Self {
            root: id,
            elements,
            diagrams: IndexMap::new(),
            retired: FxHashSet::default(),
        }
    }

    /// The root element's ID.
    pub fn root(&self) -> &ElementId {
        &self.root
    }

    /// Mint an ID that has never been used in this document.
    ///
    /// IDs are assigned exactly once per element and never reused, even
    /// after the element is deleted.
    pub(crate) fn mint_id(&mut self) -> ElementId {
        loop {
            let id = ElementId::generate();
            if !self.elements.contains_key(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }

    // ------------------------------------------------------------------
    // Semantic layer: lookup
    // ------------------------------------------------------------------

    /// Resolve an ID to a live element. Returns `None` for unknown and
    /// retired IDs alike.
    pub fn resolve(&self, id: &ElementId) -> Option<&SemanticElement> {
        self.elements.get(id)
    }

    /// Like [`Document::resolve`] but with a structured error.
    pub fn element(&self, id: &ElementId) -> Result<&SemanticElement, DocumentError> {
        self.elements
            .get(id)
            .ok_or_else(|| DocumentError::UnknownElement(id.clone()))
    }

    pub(crate) fn element_mut(
        &mut self,
        id: &ElementId,
    ) -> Result<&mut SemanticElement, DocumentError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| DocumentError::UnknownElement(id.clone()))
    }

    /// All live elements in insertion order.
    pub fn iter_elements(&self) -> impl Iterator<Item = &SemanticElement> {
        self.elements.values()
    }

    /// Number of live elements, root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// IDs of `root` and every element it transitively owns, in preorder.
    pub fn subtree_ids(&self, root: &ElementId) -> Result<Vec<ElementId>, DocumentError> {
        let mut ids = Vec::new();
        let mut pending = vec![root.clone()];
        while let Some(id) = pending.pop() {
            let element = self.element(&id)?;
            // Children pushed in reverse so preorder comes out stable.
            for child in element.children.iter().rev() {
                pending.push(child.clone());
            }
            ids.push(id);
        }
        Ok(ids)
    }

    // ------------------------------------------------------------------
    // Semantic layer: mutation (command-internal)
    // ------------------------------------------------------------------

    /// Create a fresh element under `parent`.
    pub(crate) fn create_element(
        &mut self,
        kind: ElementKind,
        parent: &ElementId,
    ) -> Result<ElementId, DocumentError> {
        if !self.elements.contains_key(parent) {
            return Err(DocumentError::UnknownElement(parent.clone()));
        }
        let id = self.mint_id();
        let element = SemanticElement::new(id.clone(), kind, Some(parent.clone()));
        self.elements.insert(id.clone(), element);
        self.elements
            .get_mut(parent)
            .expect("parent checked above")
            .children
            .push(id.clone());
        trace!("[DOC] created {kind} {id} under {parent}");
        Ok(id)
    }

    /// Move `element` (and its owned subtree) under `new_parent`.
    ///
    /// `index` places the element at a specific position in the new
    /// parent's children; `None` appends. Returns the previous
    /// (parent, index) so the move can be undone exactly.
    pub(crate) fn reparent(
        &mut self,
        element: &ElementId,
        new_parent: &ElementId,
        index: Option<usize>,
    ) -> Result<(ElementId, usize), DocumentError> {
        let old_parent = self
            .element(element)?
            .parent
            .clone()
            .ok_or(DocumentError::RootDeletion)?;
        if !self.elements.contains_key(new_parent) {
            return Err(DocumentError::UnknownElement(new_parent.clone()));
        }
        // The new parent must not live inside the moved subtree.
        if self.subtree_ids(element)?.contains(new_parent) {
            return Err(DocumentError::CyclicContainment(element.clone()));
        }

        let old_parent_element = self.element_mut(&old_parent)?;
        let old_index = old_parent_element
            .children
            .iter()
            .position(|c| c == element)
            .ok_or_else(|| DocumentError::UnknownElement(element.clone()))?;
        old_parent_element.children.remove(old_index);

        let new_parent_element = self.element_mut(new_parent)?;
        let index = index
            .unwrap_or(new_parent_element.children.len())
            .min(new_parent_element.children.len());
        new_parent_element.children.insert(index, element.clone());
        self.element_mut(element)?.parent = Some(new_parent.clone());

        trace!("[DOC] reparented {element} from {old_parent} to {new_parent}");
        Ok((old_parent, old_index))
    }

    /// Detach `root`'s owned subtree, retiring every ID in it.
    ///
    /// The returned [`DetachedSubtree`] restores the exact prior state via
    /// [`Document::restore_subtree`].
    pub(crate) fn remove_subtree(
        &mut self,
        root: &ElementId,
    ) -> Result<DetachedSubtree, DocumentError> {
        let parent = self
            .element(root)?
            .parent
            .clone()
            .ok_or(DocumentError::RootDeletion)?;

        let ids = self.subtree_ids(root)?;
        let parent_element = self.element_mut(&parent)?;
        let index = parent_element
            .children
            .iter()
            .position(|c| c == root)
            .ok_or_else(|| DocumentError::UnknownElement(root.clone()))?;
        parent_element.children.remove(index);

        let mut elements = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(element) = self.elements.shift_remove(id) {
                self.retired.insert(id.clone());
                elements.push(element);
            }
        }
        trace!("[DOC] detached subtree of {} element(s) at {root}", elements.len());
        Ok(DetachedSubtree {
            parent,
            index,
            elements,
        })
    }

    /// Undo a [`Document::remove_subtree`].
    pub(crate) fn restore_subtree(
        &mut self,
        subtree: DetachedSubtree,
    ) -> Result<(), DocumentError> {
        let DetachedSubtree {
            parent,
            index,
            elements,
        } = subtree;
        let root_id = match elements.first() {
            Some(root) => root.id().clone(),
            None => return Ok(()),
        };
        for element in elements {
            let id = element.id().clone();
            self.retired.remove(&id);
            self.elements.insert(id, element);
        }
        let parent_element = self.element_mut(&parent)?;
        let index = index.min(parent_element.children.len());
        parent_element.children.insert(index, root_id);
        Ok(())
    }

    /// Whether an ID was ever live in this document and has since been
    /// deleted.
    pub fn is_retired(&self, id: &ElementId) -> bool {
        self.retired.contains(id)
    }

    // ------------------------------------------------------------------
    // Notation layer
    // ------------------------------------------------------------------

    /// The diagram of a representation, if any notation exists for it.
    pub fn diagram(&self, representation: Representation) -> Option<&Diagram> {
        self.diagrams.get(&representation)
    }

    /// Representations that currently have a diagram.
    pub fn active_representations(&self) -> impl Iterator<Item = Representation> + '_ {
        self.diagrams.keys().copied()
    }

    pub(crate) fn diagram_mut(&mut self, representation: Representation) -> &mut Diagram {
        self.diagrams.entry(representation).or_default()
    }

    /// Add notation for a live semantic element.
    pub(crate) fn add_notation(
        &mut self,
        representation: Representation,
        notation: NotationElement,
    ) -> Result<(), DocumentError> {
        let semantic = notation.semantic.clone();
        if !self.elements.contains_key(&semantic) {
            return Err(DocumentError::UnknownElement(semantic));
        }
        let diagram = self.diagram_mut(representation);
        if diagram.contains(&semantic) {
            return Err(DocumentError::DuplicateNotation {
                representation,
                element: semantic,
            });
        }
        diagram.insert(notation);
        Ok(())
    }

    /// Remove one element's notation from one diagram.
    pub(crate) fn remove_notation(
        &mut self,
        representation: Representation,
        semantic: &ElementId,
    ) -> Option<NotationElement> {
        self.diagrams
            .get_mut(&representation)
            .and_then(|diagram| diagram.remove(semantic))
    }

    /// Remove one element's notation from every diagram. Returns what was
    /// removed so the caller can restore it on rollback.
    pub(crate) fn remove_notation_everywhere(
        &mut self,
        semantic: &ElementId,
    ) -> Vec<(Representation, NotationElement)> {
        let mut removed = Vec::new();
        for (representation, diagram) in &mut self.diagrams {
            if let Some(notation) = diagram.remove(semantic) {
                removed.push((*representation, notation));
            }
        }
        removed
    }

    pub(crate) fn restore_notation(
        &mut self,
        entries: Vec<(Representation, NotationElement)>,
    ) {
        for (representation, notation) in entries {
            self.diagram_mut(representation).insert(notation);
        }
    }

    pub(crate) fn set_bounds(
        &mut self,
        representation: Representation,
        semantic: &ElementId,
        bounds: Bounds,
    ) -> Result<Bounds, DocumentError> {
        let notation = self
            .diagrams
            .get_mut(&representation)
            .and_then(|diagram| diagram.get_mut(semantic))
            .ok_or_else(|| DocumentError::MissingNotation {
                representation,
                element: semantic.clone(),
            })?;
        match &mut notation.form {
            super::notation::NotationForm::Shape { bounds: current } => {
                let previous = *current;
                *current = bounds;
                Ok(previous)
            }
            super::notation::NotationForm::Edge { .. } => Err(DocumentError::MissingNotation {
                representation,
                element: semantic.clone(),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Container index
    // ------------------------------------------------------------------

    /// Translate an absolute diagram coordinate into one relative to
    /// `container`, by walking the container's ownership chain and
    /// accumulating shape positions.
    ///
    /// Containers without notation in the representation contribute
    /// nothing, so dropping onto the diagram background resolves to the
    /// absolute coordinate unchanged.
    pub fn relative_location(
        &self,
        representation: Representation,
        container: &ElementId,
        absolute: Point,
    ) -> Result<Point, DocumentError> {
        let origin = self.absolute_origin(representation, container)?;
        Ok(absolute.relative_to(origin))
    }

    fn absolute_origin(
        &self,
        representation: Representation,
        container: &ElementId,
    ) -> Result<Point, DocumentError> {
        let mut origin = Point::default();
        let mut current = Some(container.clone());
        while let Some(id) = current {
            let element = self.element(&id)?;
            let bounds = self
                .diagrams
                .get(&representation)
                .and_then(|diagram| diagram.get(&id))
                .and_then(|notation| notation.bounds());
            if let Some(bounds) = bounds {
                origin = Point::new(origin.x + bounds.position.x, origin.y + bounds.position.y);
            }
            current = element.parent.clone();
        }
        Ok(origin)
    }
}
