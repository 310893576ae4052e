//! Deferred element handles.

use std::sync::{Arc, OnceLock};

use crate::base::ElementId;

use super::CommandError;

/// A one-shot cell linking a notation command to the semantic element a
/// preceding command in the same transaction will create.
///
/// The creating command fills the handle at execute time; consumers read
/// it at their own execute time, never at construction. This lets
/// creation and notation placement compose inside one compound even
/// though the semantic element does not exist when the compound is built.
#[derive(Clone, Debug, Default)]
pub struct ElementHandle(Arc<OnceLock<ElementId>>);

impl ElementHandle {
    /// An unfilled handle, to be filled by a create command.
    pub fn deferred() -> Self {
        Self::default()
    }

    /// A handle already pointing at an existing element.
    pub fn resolved(id: ElementId) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(id);
        Self(Arc::new(cell))
    }

    /// Fill the handle. Redo fills with the same ID again, which is a
    /// no-op.
    pub fn fill(&self, id: ElementId) {
        let _ = self.0.set(id);
    }

    /// Read the handle, failing if the producing command has not run.
    pub fn get(&self) -> Result<ElementId, CommandError> {
        self.0.get().cloned().ok_or(CommandError::UnresolvedHandle)
    }

    /// Read without failing; `None` while unfilled.
    pub fn try_get(&self) -> Option<ElementId> {
        self.0.get().cloned()
    }
}
