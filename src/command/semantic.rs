//! Semantic-layer commands.

use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::base::ElementId;
use crate::metamodel::{ElementKind, Multiplicity, ReferenceFeature};
use crate::model::{DetachedSubtree, Document, ReferenceValue};

use super::{Command, CommandError, ElementHandle};

/// Attribute changes applied by create and update commands.
///
/// Absent fields are left untouched on update; on create they fall back to
/// the kind's defaults (display label for the name, `false` for
/// `is_abstract`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateAttributes {
    pub name: Option<SmolStr>,
    pub is_abstract: Option<bool>,
    /// Free-form properties; `None` removes the key.
    pub properties: Vec<(SmolStr, Option<String>)>,
}

impl UpdateAttributes {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_abstract.is_none() && self.properties.is_empty()
    }
}

// ============================================================================
// CREATE
// ============================================================================

/// Create a fresh element under a parent and fill an [`ElementHandle`]
/// with the new ID for later commands in the same transaction.
#[derive(Debug)]
pub struct CreateElementCommand {
    parent: ElementId,
    kind: ElementKind,
    attributes: UpdateAttributes,
    handle: ElementHandle,
    created: Option<ElementId>,
    /// Filled by undo; redo restores from here instead of minting a new ID.
    undone: Option<DetachedSubtree>,
}

impl CreateElementCommand {
    pub fn new(
        parent: ElementId,
        kind: ElementKind,
        attributes: UpdateAttributes,
        handle: ElementHandle,
    ) -> Self {
        Self {
            parent,
            kind,
            attributes,
            handle,
            created: None,
            undone: None,
        }
    }

    /// The created element's ID, once executed.
    pub fn created(&self) -> Option<&ElementId> {
        self.created.as_ref()
    }
}

impl Command for CreateElementCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        if let Some(subtree) = self.undone.take() {
            document.restore_subtree(subtree)?;
            return Ok(());
        }

        let id = document.create_element(self.kind, &self.parent)?;
        let element = document.element_mut(&id)?;
        if let Some(name) = &self.attributes.name {
            element.name = name.clone();
        }
        if let Some(is_abstract) = self.attributes.is_abstract {
            element.is_abstract = is_abstract;
        }
        for (key, value) in &self.attributes.properties {
            match value {
                Some(value) => {
                    element.properties.insert(key.clone(), value.clone());
                }
                None => {
                    element.properties.shift_remove(key);
                }
            }
        }
        self.handle.fill(id.clone());
        self.created = Some(id);
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let created = self.created.as_ref().ok_or(CommandError::NotExecuted)?;
        self.undone = Some(document.remove_subtree(created)?);
        Ok(())
    }
}

// ============================================================================
// UPDATE
// ============================================================================

/// Apply attribute changes to an existing element.
#[derive(Debug)]
pub struct UpdateElementCommand {
    element: ElementId,
    update: UpdateAttributes,
    previous: Option<UpdateAttributes>,
}

impl UpdateElementCommand {
    pub fn new(element: ElementId, update: UpdateAttributes) -> Self {
        Self {
            element,
            update,
            previous: None,
        }
    }
}

impl Command for UpdateElementCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let element = document.element_mut(&self.element)?;

        let mut previous = UpdateAttributes::default();
        if let Some(name) = &self.update.name {
            previous.name = Some(element.name.clone());
            element.name = name.clone();
        }
        if let Some(is_abstract) = self.update.is_abstract {
            previous.is_abstract = Some(element.is_abstract);
            element.is_abstract = is_abstract;
        }
        for (key, value) in &self.update.properties {
            let prior = match value {
                Some(value) => element.properties.insert(key.clone(), value.clone()),
                None => element.properties.shift_remove(key),
            };
            previous.properties.push((key.clone(), prior));
        }
        self.previous = Some(previous);
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let previous = self.previous.take().ok_or(CommandError::NotExecuted)?;
        let element = document.element_mut(&self.element)?;
        if let Some(name) = &previous.name {
            element.name = name.clone();
        }
        if let Some(is_abstract) = previous.is_abstract {
            element.is_abstract = is_abstract;
        }
        // Properties are restored in reverse so repeated keys unwind
        // correctly.
        for (key, prior) in previous.properties.into_iter().rev() {
            match prior {
                Some(value) => {
                    element.properties.insert(key, value);
                }
                None => {
                    element.properties.shift_remove(&key);
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// DELETE
// ============================================================================

/// Detach an element and its owned subtree from the semantic graph.
///
/// Notation removal and cross-reference cleanup are separate commands in
/// the same compound; this command touches only the semantic layer.
#[derive(Debug)]
pub struct DeleteElementCommand {
    element: ElementId,
    detached: Option<DetachedSubtree>,
}

impl DeleteElementCommand {
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            detached: None,
        }
    }
}

impl Command for DeleteElementCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let detached = document.remove_subtree(&self.element)?;
        debug!("[CMD] deleted {} ({} element(s))", self.element, detached.elements.len());
        self.detached = Some(detached);
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let detached = self.detached.take().ok_or(CommandError::NotExecuted)?;
        document.restore_subtree(detached)?;
        Ok(())
    }
}

// ============================================================================
// REPARENT
// ============================================================================

/// Move an element (with its owned subtree) under a new parent.
///
/// Rejected if the new parent lies inside the moved subtree, which would
/// make the ownership tree cyclic.
#[derive(Debug)]
pub struct ReparentElementCommand {
    element: ElementId,
    new_parent: ElementId,
    previous: Option<(ElementId, usize)>,
}

impl ReparentElementCommand {
    pub fn new(element: ElementId, new_parent: ElementId) -> Self {
        Self {
            element,
            new_parent,
            previous: None,
        }
    }
}

impl Command for ReparentElementCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        self.previous = Some(document.reparent(&self.element, &self.new_parent, None)?);
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let (parent, index) = self.previous.take().ok_or(CommandError::NotExecuted)?;
        document.reparent(&self.element, &parent, Some(index))?;
        Ok(())
    }
}

// ============================================================================
// REFERENCES
// ============================================================================

fn check_feature(
    document: &Document,
    element: &ElementId,
    feature: &ReferenceFeature,
) -> Result<(), CommandError> {
    let kind = document.element(element)?.kind;
    if !feature.applies_to(kind) {
        return Err(CommandError::InvalidFeature {
            feature: feature.name,
            kind,
        });
    }
    Ok(())
}

/// Set a single-valued reference feature.
///
/// The owning element is addressed through an [`ElementHandle`] so edge
/// creation can wire references on an element created earlier in the same
/// transaction.
#[derive(Debug)]
pub struct SetReferenceCommand {
    element: ElementHandle,
    feature: ReferenceFeature,
    target: ElementId,
    previous: Option<ReferenceValue>,
}

impl SetReferenceCommand {
    pub fn new(element: ElementId, feature: ReferenceFeature, target: ElementId) -> Self {
        Self::deferred(ElementHandle::resolved(element), feature, target)
    }

    pub fn deferred(element: ElementHandle, feature: ReferenceFeature, target: ElementId) -> Self {
        Self {
            element,
            feature,
            target,
            previous: None,
        }
    }
}

impl Command for SetReferenceCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let id = self.element.get()?;
        check_feature(document, &id, &self.feature)?;
        let element = document.element_mut(&id)?;
        let previous = element
            .references
            .insert(self.feature.id, ReferenceValue::Single(Some(self.target.clone())));
        self.previous = Some(previous.unwrap_or_else(|| ReferenceValue::empty(Multiplicity::Single)));
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let previous = self.previous.take().ok_or(CommandError::NotExecuted)?;
        let id = self.element.get()?;
        let element = document.element_mut(&id)?;
        element.references.insert(self.feature.id, previous);
        Ok(())
    }
}

/// Append a target to a multi-valued reference feature.
#[derive(Debug)]
pub struct AddToReferenceCommand {
    element: ElementHandle,
    feature: ReferenceFeature,
    target: ElementId,
    executed: bool,
}

impl AddToReferenceCommand {
    pub fn new(element: ElementId, feature: ReferenceFeature, target: ElementId) -> Self {
        Self::deferred(ElementHandle::resolved(element), feature, target)
    }

    pub fn deferred(element: ElementHandle, feature: ReferenceFeature, target: ElementId) -> Self {
        Self {
            element,
            feature,
            target,
            executed: false,
        }
    }
}

impl Command for AddToReferenceCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let id = self.element.get()?;
        check_feature(document, &id, &self.feature)?;
        let kind = document.element(&id)?.kind;
        let element = document.element_mut(&id)?;
        let value = element
            .references
            .entry(self.feature.id)
            .or_insert_with(|| ReferenceValue::empty(Multiplicity::Many));
        match value {
            ReferenceValue::Many(values) => values.push(self.target.clone()),
            ReferenceValue::Single(_) => {
                return Err(CommandError::InvalidFeature {
                    feature: self.feature.name,
                    kind,
                });
            }
        }
        self.executed = true;
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        if !self.executed {
            return Err(CommandError::NotExecuted);
        }
        self.executed = false;
        let id = self.element.get()?;
        let element = document.element_mut(&id)?;
        if let Some(ReferenceValue::Many(values)) = element.references.get_mut(&self.feature.id) {
            if let Some(position) = values.iter().rposition(|id| id == &self.target) {
                values.remove(position);
            }
        }
        Ok(())
    }
}

/// Clear a reference feature entirely (single-valued cleanup).
#[derive(Debug)]
pub struct ClearReferenceCommand {
    element: ElementId,
    feature: ReferenceFeature,
    previous: Option<ReferenceValue>,
}

impl ClearReferenceCommand {
    pub fn new(element: ElementId, feature: ReferenceFeature) -> Self {
        Self {
            element,
            feature,
            previous: None,
        }
    }
}

impl Command for ClearReferenceCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let element = document.element_mut(&self.element)?;
        let previous = element
            .references
            .insert(self.feature.id, ReferenceValue::empty(self.feature.multiplicity));
        self.previous = Some(previous.unwrap_or_else(|| ReferenceValue::empty(self.feature.multiplicity)));
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let previous = self.previous.take().ok_or(CommandError::NotExecuted)?;
        let element = document.element_mut(&self.element)?;
        element.references.insert(self.feature.id, previous);
        Ok(())
    }
}

/// Remove one target from a multi-valued reference feature
/// (collection cleanup).
#[derive(Debug)]
pub struct RemoveFromReferenceCommand {
    element: ElementId,
    feature: ReferenceFeature,
    target: ElementId,
    removed_at: Option<usize>,
}

impl RemoveFromReferenceCommand {
    pub fn new(element: ElementId, feature: ReferenceFeature, target: ElementId) -> Self {
        Self {
            element,
            feature,
            target,
            removed_at: None,
        }
    }
}

impl Command for RemoveFromReferenceCommand {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError> {
        let element = document.element_mut(&self.element)?;
        if let Some(ReferenceValue::Many(values)) = element.references.get_mut(&self.feature.id) {
            if let Some(position) = values.iter().position(|id| id == &self.target) {
                values.remove(position);
                self.removed_at = Some(position);
                return Ok(());
            }
        }
        // The target may already be gone; removal is idempotent.
        self.removed_at = None;
        Ok(())
    }

    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        if let Some(position) = self.removed_at.take() {
            let element = document.element_mut(&self.element)?;
            if let Some(ReferenceValue::Many(values)) = element.references.get_mut(&self.feature.id)
            {
                let position = position.min(values.len());
                values.insert(position, self.target.clone());
            }
        }
        Ok(())
    }
}

// ============================================================================
// NO-OP
// ============================================================================

/// A command that does nothing.
///
/// Operations naming a source or target that no longer resolves degrade to
/// this instead of failing hard — the model may have changed between
/// client intent and server receipt.
#[derive(Debug)]
pub struct NoOpCommand {
    reason: SmolStr,
}

impl NoOpCommand {
    pub fn new(reason: impl Into<SmolStr>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Command for NoOpCommand {
    fn execute(&mut self, _document: &mut Document) -> Result<(), CommandError> {
        warn!("[CMD] degraded to no-op: {}", self.reason);
        Ok(())
    }

    fn undo(&mut self, _document: &mut Document) -> Result<(), CommandError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metamodel::feature_set;
    use crate::base::Representation;

    fn class_fixture() -> (Document, ElementId, ElementId) {
        let mut document = Document::new();
        let root = document.root().clone();
        let a = document.create_element(ElementKind::Class, &root).unwrap();
        let b = document.create_element(ElementKind::Class, &root).unwrap();
        (document, a, b)
    }

    fn general_feature() -> ReferenceFeature {
        feature_set(Representation::Class)
            .iter()
            .copied()
            .find(|f| f.owner == ElementKind::Generalization)
            .unwrap()
    }

    #[test]
    fn test_create_applies_attributes_and_fills_handle() {
        let mut document = Document::new();
        let root = document.root().clone();
        let handle = ElementHandle::deferred();
        let mut command = CreateElementCommand::new(
            root,
            ElementKind::Class,
            UpdateAttributes {
                name: Some("Foo".into()),
                is_abstract: Some(true),
                properties: vec![],
            },
            handle.clone(),
        );

        command.execute(&mut document).unwrap();
        let id = handle.get().unwrap();
        let element = document.resolve(&id).unwrap();
        assert_eq!(element.name, "Foo");
        assert!(element.is_abstract);
    }

    #[test]
    fn test_create_undo_redo_keeps_id() {
        let mut document = Document::new();
        let root = document.root().clone();
        let handle = ElementHandle::deferred();
        let mut command = CreateElementCommand::new(
            root,
            ElementKind::Class,
            UpdateAttributes::default(),
            handle.clone(),
        );

        command.execute(&mut document).unwrap();
        let id = handle.get().unwrap();

        command.undo(&mut document).unwrap();
        assert!(document.resolve(&id).is_none());

        command.execute(&mut document).unwrap();
        assert!(document.resolve(&id).is_some(), "redo restores the same ID");
    }

    #[test]
    fn test_update_undo_restores_previous_values() {
        let (mut document, a, _) = class_fixture();
        let original_name = document.resolve(&a).unwrap().name.clone();

        let mut command = UpdateElementCommand::new(
            a.clone(),
            UpdateAttributes {
                name: Some("Renamed".into()),
                is_abstract: Some(true),
                properties: vec![("note".into(), Some("x".into()))],
            },
        );
        command.execute(&mut document).unwrap();
        assert_eq!(document.resolve(&a).unwrap().name, "Renamed");

        command.undo(&mut document).unwrap();
        let element = document.resolve(&a).unwrap();
        assert_eq!(element.name, original_name);
        assert!(!element.is_abstract);
        assert!(element.properties.get("note").is_none());
    }

    #[test]
    fn test_reparent_undo_restores_position() {
        let mut document = Document::new();
        let root = document.root().clone();
        let a = document.create_element(ElementKind::Package, &root).unwrap();
        let b = document.create_element(ElementKind::Package, &root).unwrap();
        let first = document.create_element(ElementKind::Class, &a).unwrap();
        let _second = document.create_element(ElementKind::Class, &a).unwrap();

        let mut command = ReparentElementCommand::new(first.clone(), b.clone());
        command.execute(&mut document).unwrap();
        assert_eq!(document.resolve(&first).unwrap().parent, Some(b.clone()));

        command.undo(&mut document).unwrap();
        assert_eq!(document.resolve(&first).unwrap().parent, Some(a.clone()));
        // Back at its original position, ahead of its sibling.
        assert_eq!(document.resolve(&a).unwrap().children[0], first);
    }

    #[test]
    fn test_set_reference_rejects_wrong_kind() {
        let (mut document, a, b) = class_fixture();
        // `general` lives on Generalization elements, not on classes.
        let mut command = SetReferenceCommand::new(a, general_feature(), b);
        assert!(matches!(
            command.execute(&mut document),
            Err(CommandError::InvalidFeature { .. })
        ));
    }

    #[test]
    fn test_remove_from_reference_is_idempotent() {
        let (mut document, a, b) = class_fixture();
        let feature = feature_set(Representation::Class)
            .iter()
            .copied()
            .find(|f| f.owner == ElementKind::Dependency)
            .unwrap();
        let dependency = document
            .create_element(ElementKind::Dependency, &document.root().clone())
            .unwrap();
        let mut add = AddToReferenceCommand::new(dependency.clone(), feature, a.clone());
        add.execute(&mut document).unwrap();

        let mut remove = RemoveFromReferenceCommand::new(dependency.clone(), feature, b.clone());
        remove.execute(&mut document).unwrap();
        assert!(document.resolve(&dependency).unwrap().references_target(&a));

        let mut remove_a = RemoveFromReferenceCommand::new(dependency.clone(), feature, a.clone());
        remove_a.execute(&mut document).unwrap();
        assert!(!document.resolve(&dependency).unwrap().references_target(&a));

        remove_a.undo(&mut document).unwrap();
        assert!(document.resolve(&dependency).unwrap().references_target(&a));
    }
}
