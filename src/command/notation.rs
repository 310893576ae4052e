//! Notation-layer commands.

use crate::base::{Bounds, Dimension, ElementId, Point, Representation};
use crate::model::{Document, NotationElement};

use super::{Command, CommandError, ElementHandle};

/// Place a shape for a semantic element in one diagram.
///
/// The semantic element is addressed through an [`ElementHandle`] so the
/// shape can be placed for an element created earlier in the same
/// transaction. The size falls back to the kind's default when the client
/// sent none.
#[derive(Debug)]
pub struct AddShapeNotationCommand {
    representation: Representation,
    semantic: ElementHandle,
    position: Option<Point>,
    size: Option<Dimension>,
    added: Option<ElementId>,
}

impl AddShapeNotationCommand {
    pub fn new(
        representation: Representation,
        semantic: ElementHandle,
        position: Option<Point>,
        size: Option<Dimension>,
    ) -> Self {
        Self {
            representation,
            semantic,
            position,
            size,
            added: None,
        }
    }
}

impl Command for AddShapeNotationCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let semantic = self.semantic.get()?;
        let kind = document.element(&semantic)?.kind;
        let bounds = Bounds::new(
            self.position.unwrap_or_default(),
            self.size.unwrap_or_else(|| kind.default_size()),
        );
        document.add_notation(self.representation, NotationElement::shape(semantic.clone(), bounds))?;
        self.added = Some(semantic);
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let semantic = self.added.take().ok_or(CommandError::NotExecuted)?;
        document.remove_notation(self.representation, &semantic);
        Ok(())
    }
}

/// Place an edge for a relationship element in one diagram.
#[derive(Debug)]
pub struct AddEdgeNotationCommand {
    representation: Representation,
    semantic: ElementHandle,
    added: Option<ElementId>,
}

impl AddEdgeNotationCommand {
    pub fn new(representation: Representation, semantic: ElementHandle) -> Self {
        Self {
            representation,
            semantic,
            added: None,
        }
    }
}

impl Command for AddEdgeNotationCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let semantic = self.semantic.get()?;
        document.add_notation(self.representation, NotationElement::edge(semantic.clone()))?;
        self.added = Some(semantic);
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let semantic = self.added.take().ok_or(CommandError::NotExecuted)?;
        document.remove_notation(self.representation, &semantic);
        Ok(())
    }
}

/// Remove a semantic element's notation from every diagram it appears in.
///
/// Paired with the semantic delete inside the same compound; also emitted
/// for each deleted descendant so no diagram keeps a shape whose element
/// is gone.
#[derive(Debug)]
pub struct DeleteNotationCommand {
    semantic: ElementId,
    removed: Option<Vec<(Representation, NotationElement)>>,
}

impl DeleteNotationCommand {
    pub fn new(semantic: ElementId) -> Self {
        Self {
            semantic,
            removed: None,
        }
    }
}

impl Command for DeleteNotationCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        self.removed = Some(document.remove_notation_everywhere(&self.semantic));
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let removed = self.removed.take().ok_or(CommandError::NotExecuted)?;
        document.restore_notation(removed);
        Ok(())
    }
}

/// Move or resize an existing shape.
#[derive(Debug)]
pub struct ChangeBoundsCommand {
    representation: Representation,
    element: ElementId,
    bounds: Bounds,
    previous: Option<Bounds>,
}

impl ChangeBoundsCommand {
    pub fn new(representation: Representation, element: ElementId, bounds: Bounds) -> Self {
        Self {
            representation,
            element,
            bounds,
            previous: None,
        }
    }
}

impl Command for ChangeBoundsCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let previous = document.set_bounds(self.representation, &self.element, self.bounds)?;
        self.previous = Some(previous);
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let previous = self.previous.take().ok_or(CommandError::NotExecuted)?;
        document.set_bounds(self.representation, &self.element, previous)?;
        Ok(())
    }
}
