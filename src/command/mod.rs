//! Commands: the atomic unit of change.
//!
//! Every mutation of the document happens through a [`Command`]. A command
//! is inert data until executed; at execute time it records whatever it
//! needs to undo itself. [`CompoundCommand`] strings commands into an
//! all-or-nothing transaction, and [`CommandStack`] keeps the applied
//! transactions for undo/redo.
//!
//! Ordering inside a compound is significant: semantic mutations first,
//! notation mutations second (reading the semantic result through a
//! deferred [`ElementHandle`]), cross-reference cleanup last.

mod compound;
mod handle;
mod notation;
mod semantic;
mod stack;

pub use compound::{CompoundCommand, TransactionFailure};
pub use handle::ElementHandle;
pub use notation::{
    AddEdgeNotationCommand, AddShapeNotationCommand, ChangeBoundsCommand, DeleteNotationCommand,
};
pub use semantic::{
    AddToReferenceCommand, ClearReferenceCommand, CreateElementCommand, DeleteElementCommand,
    NoOpCommand, RemoveFromReferenceCommand, ReparentElementCommand, SetReferenceCommand,
    UpdateAttributes, UpdateElementCommand,
};
pub use stack::CommandStack;

use thiserror::Error;

use crate::model::{Document, DocumentError};

/// Errors raised by individual commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A deferred element handle was read before the producing command ran.
    #[error("deferred element handle resolved before its producer executed")]
    UnresolvedHandle,

    /// A reference feature was applied to an element kind that does not
    /// carry it.
    #[error("feature '{feature}' does not exist on kind '{kind}'")]
    InvalidFeature {
        feature: &'static str,
        kind: crate::metamodel::ElementKind,
    },

    /// Undo was requested for a command that never executed.
    #[error("cannot undo a command that has not executed")]
    NotExecuted,

    /// Escape hatch for externally defined commands (fault injection in
    /// tests, collaborator extensions).
    #[error("{0}")]
    Failed(String),
}

/// An atomic, reversible unit of mutation.
///
/// `execute` must either apply the full mutation or leave the document
/// untouched and return an error; partial application is never observable.
/// `undo` restores the exact pre-execute state using what `execute`
/// recorded.
pub trait Command: Send + Sync + std::fmt::Debug {
    fn execute(&mut self, document: &mut Document) -> Result<(), CommandError>;
    fn undo(&mut self, document: &mut Document) -> Result<(), CommandError>;
}
