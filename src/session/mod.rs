//! Editing sessions.
//!
//! One session owns one document for its whole lifetime. Operations are
//! serialized into a single logical timeline behind the session's write
//! lock; read-only queries (mapping, lookups) share a read lock and never
//! observe an in-flight transaction. Independent sessions share nothing
//! and run fully in parallel.
//!
//! There are no process-wide singletons: every provider and command call
//! receives its context explicitly, and the session object is the only
//! holder of mutable state.

mod editor;
mod response;

pub use editor::{EditorSession, SessionState};
pub use response::EditResponse;

use thiserror::Error;

use crate::command::{CommandError, TransactionFailure};
use crate::mapper::MapperError;
use crate::model::DocumentError;
use crate::operation::{DecodeError, DispatchError};

/// Everything that can go wrong while processing an operation.
///
/// Only [`EditError::Transaction`] involves rollback; every other variant
/// is detected before any mutation occurs, and the document is untouched.
#[derive(Debug, Error)]
pub enum EditError {
    /// The session was closed; no further operations are accepted.
    #[error("session is closed")]
    SessionClosed,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Mapper(#[from] MapperError),

    /// A sub-command failed mid-transaction; the document was rolled back
    /// to its pre-attempt state.
    #[error(transparent)]
    Transaction(#[from] TransactionFailure),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl EditError {
    /// Stable failure discriminator for the client-facing envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::SessionClosed => "session_closed",
            EditError::Decode(_) => "decode_error",
            EditError::Dispatch(DispatchError::Decode(_)) => "decode_error",
            EditError::Dispatch(_) => "unknown_type",
            EditError::Mapper(_) => "no_mapper_found",
            EditError::Transaction(_) => "transaction_failure",
            EditError::Command(_) | EditError::Document(_) => "command_error",
        }
    }
}
