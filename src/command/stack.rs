//! The per-session execution and undo stack.

use tracing::debug;

use crate::model::Document;

use super::compound::{CompoundCommand, TransactionFailure};
use super::CommandError;

/// Applies compound commands transactionally and keeps the history for
/// undo/redo.
///
/// A successful execute pushes the transaction onto the undo stack and
/// clears the redo stack; a failed execute leaves both stacks and the
/// document untouched.
#[derive(Debug, Default)]
pub struct CommandStack {
    undo_stack: Vec<CompoundCommand>,
    redo_stack: Vec<CompoundCommand>,
}

impl CommandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(
        &mut self,
        mut compound: CompoundCommand,
        document: &mut Document,
    ) -> Result<(), TransactionFailure> {
        compound.execute(document)?;
        debug!("[STACK] applied '{}' ({} step(s))", compound.label(), compound.len());
        self.undo_stack.push(compound);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the most recent transaction. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> Result<bool, CommandError> {
        let Some(mut compound) = self.undo_stack.pop() else {
            return Ok(false);
        };
        compound.undo(document)?;
        debug!("[STACK] undid '{}'", compound.label());
        self.redo_stack.push(compound);
        Ok(true)
    }

    /// Re-apply the most recently undone transaction. Returns `false`
    /// when there is nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> Result<bool, TransactionFailure> {
        let Some(mut compound) = self.redo_stack.pop() else {
            return Ok(false);
        };
        compound.execute(document)?;
        debug!("[STACK] redid '{}'", compound.label());
        self.undo_stack.push(compound);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
