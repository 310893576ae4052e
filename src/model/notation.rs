//! Notation elements: the per-diagram visual projection.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{Bounds, ElementId, Point};

/// Shape or edge form of a notation element.
#[derive(Clone, Debug, PartialEq)]
pub enum NotationForm {
    Shape { bounds: Bounds },
    Edge { bend_points: Vec<Point> },
}

/// The visual projection of one semantic element within one diagram.
///
/// For a given (Representation, SemanticElement) pair there is at most one
/// primary notation element; [`Diagram::insert`] enforces this. Deleting
/// the semantic element deletes its notation in the same transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct NotationElement {
    /// Back-link into the semantic layer.
    pub semantic: ElementId,
    pub form: NotationForm,
    /// Style hints, passed through to the graphical projection untouched.
    pub style: IndexMap<SmolStr, String>,
}

impl NotationElement {
    pub fn shape(semantic: ElementId, bounds: Bounds) -> Self {
        Self {
            semantic,
            form: NotationForm::Shape { bounds },
            style: IndexMap::new(),
        }
    }

    pub fn edge(semantic: ElementId) -> Self {
        Self {
            semantic,
            form: NotationForm::Edge {
                bend_points: Vec::new(),
            },
            style: IndexMap::new(),
        }
    }

    /// Shape bounds, if this element is a shape.
    pub fn bounds(&self) -> Option<Bounds> {
        match &self.form {
            NotationForm::Shape { bounds } => Some(*bounds),
            NotationForm::Edge { .. } => None,
        }
    }
}

/// All notation of one representation, keyed by semantic element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    elements: IndexMap<ElementId, NotationElement>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert notation for a semantic element.
    ///
    /// Returns the previous notation if the semantic element was already
    /// projected into this diagram — callers treat that as an integrity
    /// error, the diagram itself just reports it.
    pub(crate) fn insert(&mut self, notation: NotationElement) -> Option<NotationElement> {
        self.elements.insert(notation.semantic.clone(), notation)
    }

    pub(crate) fn remove(&mut self, semantic: &ElementId) -> Option<NotationElement> {
        self.elements.shift_remove(semantic)
    }

    pub fn get(&self, semantic: &ElementId) -> Option<&NotationElement> {
        self.elements.get(semantic)
    }

    pub(crate) fn get_mut(&mut self, semantic: &ElementId) -> Option<&mut NotationElement> {
        self.elements.get_mut(semantic)
    }

    pub fn contains(&self, semantic: &ElementId) -> bool {
        self.elements.contains_key(semantic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotationElement> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
