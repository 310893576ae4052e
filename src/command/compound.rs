//! Compound commands: ordered, all-or-nothing transactions.

use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, error};

use crate::model::Document;

use super::{Command, CommandError};

/// A sub-command failed; every previously applied sub-command in the same
/// transaction has been rolled back, so the document is observably
/// unchanged from before the attempt.
#[derive(Debug, Error)]
#[error("transaction '{label}' failed at step {index} of {len}: {source}")]
pub struct TransactionFailure {
    pub label: SmolStr,
    /// Zero-based position of the failing sub-command.
    pub index: usize,
    pub len: usize,
    #[source]
    pub source: CommandError,
}

/// An ordered sequence of commands applied as one transaction.
///
/// Append order is execution order: semantic mutations first, notation
/// mutations second, cross-reference cleanup last. For deletions the
/// cleanup commands are computed against the pre-deletion graph (the
/// remover needs the referrers while they are still reachable) but
/// appended after the delete — one transaction, two computation times.
#[derive(Debug, Default)]
pub struct CompoundCommand {
    label: SmolStr,
    commands: Vec<Box<dyn Command>>,
}

impl CompoundCommand {
    pub fn new(label: impl Into<SmolStr>) -> Self {
        Self {
            label: label.into(),
            commands: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn append(&mut self, command: impl Command + 'static) {
        self.commands.push(Box::new(command));
    }

    pub fn append_boxed(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Box<dyn Command>>) {
        self.commands.extend(commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Execute every sub-command in order.
    ///
    /// If the i-th sub-command fails, sub-commands 0..i are undone in
    /// reverse order before the error is returned; no partial application
    /// is observable.
    pub fn execute(&mut self, document: &mut Document) -> Result<(), TransactionFailure> {
        let len = self.commands.len();
        for index in 0..len {
            if let Err(source) = self.commands[index].execute(document) {
                debug!(
                    "[CMD] '{}' failed at step {index}/{len}, rolling back",
                    self.label
                );
                for applied in self.commands[..index].iter_mut().rev() {
                    if let Err(undo_error) = applied.undo(document) {
                        // Rollback of a just-applied command must not fail;
                        // if it does the invariant is already broken, so
                        // surface it loudly and keep unwinding.
                        error!(
                            "[CMD] rollback of {applied:?} failed during '{}': {undo_error}",
                            self.label
                        );
                    }
                }
                return Err(TransactionFailure {
                    label: self.label.clone(),
                    index,
                    len,
                    source,
                });
            }
        }
        Ok(())
    }

    /// Undo the whole transaction, newest sub-command first.
    pub fn undo(&mut self, document: &mut Document) -> Result<(), CommandError> {
        for command in self.commands.iter_mut().rev() {
            command.undo(document)?;
        }
        Ok(())
    }
}
