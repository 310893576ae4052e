//! The editor session.

use std::sync::Arc;

use parking_lot::RwLock;
use smol_str::SmolStr;
use tracing::debug;
use uuid::Uuid;

use crate::base::{ElementId, Representation};
use crate::command::CommandStack;
use crate::mapper::{GraphicalNode, MapperRegistry};
use crate::model::Document;
use crate::operation::{ActionKind, OperationDecoder, ProviderRegistry, RequestOperation};

use super::response::EditResponse;
use super::EditError;

/// Session lifecycle.
///
/// `Open` until the first operation applies, `Active` afterwards,
/// `Closed` once [`EditorSession::close`] is called. Closing is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Active,
    Closed,
}

struct SessionInner {
    document: Document,
    stack: CommandStack,
    state: SessionState,
}

/// One editing session over one document.
///
/// The inner lock serializes command application: `process`, `undo` and
/// `redo` take it exclusively, read-side queries take it shared, so
/// mapping always observes either the pre- or post-transaction state,
/// never an intermediate one. There is no blocking I/O inside command
/// application.
pub struct EditorSession {
    id: SmolStr,
    representation: Representation,
    mappers: Arc<MapperRegistry>,
    providers: Arc<ProviderRegistry>,
    inner: RwLock<SessionInner>,
}

impl EditorSession {
    /// A session over a fresh document, wired with the default mapper and
    /// provider registries.
    pub fn new(representation: Representation) -> Self {
        Self::with_registries(
            representation,
            Arc::new(MapperRegistry::with_defaults()),
            Arc::new(ProviderRegistry::with_defaults()),
        )
    }

    /// A session with explicit registries; registries may be shared
    /// between sessions, they are immutable after construction.
    pub fn with_registries(
        representation: Representation,
        mappers: Arc<MapperRegistry>,
        providers: Arc<ProviderRegistry>,
    ) -> Self {
        Self {
            id: SmolStr::new(Uuid::new_v4().to_string()),
            representation,
            mappers,
            providers,
            inner: RwLock::new(SessionInner {
                document: Document::new(),
                stack: CommandStack::new(),
                state: SessionState::Open,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn state(&self) -> SessionState {
        self.inner.read().state
    }

    /// Close the session. Pending state stays readable; further
    /// operations fail with [`EditError::SessionClosed`].
    pub fn close(&self) {
        let mut inner = self.inner.write();
        inner.state = SessionState::Closed;
        debug!("[SESSION] {} closed", self.id);
    }

    /// Process one inbound operation:
    /// decode → dispatch → compose → apply → map.
    ///
    /// Decode and dispatch failures reject the operation with zero side
    /// effects. Once application begins it runs to completion or rolls
    /// back fully; there is no mid-transaction cancellation.
    pub fn process(&self, operation: &RequestOperation) -> Result<EditResponse, EditError> {
        let mut inner = self.inner.write();
        if inner.state == SessionState::Closed {
            return Err(EditError::SessionClosed);
        }
        debug!("[SESSION] {} processing '{}'", self.id, operation.op_type);

        // Decoded: resolve IDs and type the payload.
        let decoded =
            OperationDecoder::new(&inner.document, self.representation).decode(operation)?;

        // Dispatched + Composed: one provider compiles the transaction.
        let outcome = self
            .providers
            .dispatch(&inner.document, self.representation, decoded)?;

        // Deletion responses report the whole doomed subtree, which is
        // only enumerable before the transaction runs.
        let removed = match outcome.action {
            ActionKind::Delete => inner.document.subtree_ids(&outcome.subject.get()?)?,
            _ => Vec::new(),
        };

        // Applied: all-or-nothing.
        let inner = &mut *inner;
        inner
            .stack
            .execute(outcome.compound, &mut inner.document)?;
        inner.state = SessionState::Active;

        // Mapped: re-project the affected element for the response. A
        // degraded create (stale endpoint, no-op transaction) leaves the
        // subject handle unfilled and the response empty.
        let mut response = EditResponse::empty(self.representation);
        match outcome.action {
            ActionKind::Create | ActionKind::Update => {
                if let Some(subject) = outcome.subject.try_get() {
                    response.nodes.push(self.mappers.map(
                        &inner.document,
                        self.representation,
                        &subject,
                    )?);
                }
            }
            ActionKind::Delete => response.removed = removed,
        }
        Ok(response)
    }

    /// Undo the most recent transaction. `Ok(false)` when the history is
    /// empty.
    pub fn undo(&self) -> Result<bool, EditError> {
        let mut inner = self.inner.write();
        if inner.state == SessionState::Closed {
            return Err(EditError::SessionClosed);
        }
        let inner = &mut *inner;
        Ok(inner.stack.undo(&mut inner.document)?)
    }

    /// Re-apply the most recently undone transaction. `Ok(false)` when
    /// there is nothing to redo.
    pub fn redo(&self) -> Result<bool, EditError> {
        let mut inner = self.inner.write();
        if inner.state == SessionState::Closed {
            return Err(EditError::SessionClosed);
        }
        let inner = &mut *inner;
        Ok(inner.stack.redo(&mut inner.document)?)
    }

    /// Project one element graphically. Read-only; may run concurrently
    /// with other reads.
    pub fn map_element(&self, element: &ElementId) -> Result<GraphicalNode, EditError> {
        let inner = self.inner.read();
        Ok(self
            .mappers
            .map(&inner.document, self.representation, element)?)
    }

    /// Read-only access to the document under the shared lock.
    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.inner.read().document)
    }
}
