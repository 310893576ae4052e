//! Provider registration and operation dispatch.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

use crate::base::Representation;
use crate::command::{CompoundCommand, ElementHandle};
use crate::metamodel::{edge_kinds, node_kinds, ElementKind};
use crate::model::{Document, DocumentError};

use super::provider::{CommandProvider, CreateRequest, ProviderContext};
use super::providers::{EdgeCommandProvider, NodeCommandProvider};
use super::request::{DecodeError, DecodedOperation};

/// Dispatch-stage failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No provider registered for the resolved (representation, kind)
    /// pair.
    #[error("no command provider for kind '{kind}' in {representation} diagram")]
    UnknownType {
        representation: Representation,
        kind: ElementKind,
    },

    /// Two providers registered for the same pair — a configuration
    /// error, raised at registration time.
    #[error("duplicate command provider for kind '{kind}' in {representation} diagram")]
    DuplicateProvider {
        representation: Representation,
        kind: ElementKind,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// What an operation asked for; drives response building after apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

/// A dispatched operation: the compiled transaction plus the element it
/// is about.
///
/// For creates the subject handle is filled during execution; for updates
/// and deletes it is resolved up front.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub action: ActionKind,
    pub subject: ElementHandle,
    pub compound: CompoundCommand,
}

/// Lookup table from (Representation, ElementKind) to the one provider
/// handling that pair.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: FxHashMap<(Representation, ElementKind), Box<dyn CommandProvider>>,
}

impl ProviderRegistry {
    /// An empty registry. Most callers want
    /// [`ProviderRegistry::with_defaults`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the default vocabulary wired: every node kind to
    /// [`NodeCommandProvider`], every edge kind to [`EdgeCommandProvider`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for representation in Representation::ALL {
            for kind in node_kinds(representation) {
                registry
                    .register(representation, *kind, NodeCommandProvider)
                    .expect("default node vocabulary has no duplicates");
            }
            for kind in edge_kinds(representation) {
                registry
                    .register(representation, *kind, EdgeCommandProvider)
                    .expect("default edge vocabulary has no duplicates");
            }
        }
        registry
    }

    /// Register a provider. Claiming an already-claimed pair is fatal
    /// configuration damage and fails immediately, not at dispatch time.
    pub fn register(
        &mut self,
        representation: Representation,
        kind: ElementKind,
        provider: impl CommandProvider + 'static,
    ) -> Result<(), DispatchError> {
        let key = (representation, kind);
        if self.providers.contains_key(&key) {
            return Err(DispatchError::DuplicateProvider {
                representation,
                kind,
            });
        }
        self.providers.insert(key, Box::new(provider));
        Ok(())
    }

    pub fn is_registered(&self, representation: Representation, kind: ElementKind) -> bool {
        self.providers.contains_key(&(representation, kind))
    }

    /// Resolve the provider for a decoded operation and compile it into a
    /// transaction.
    pub fn dispatch(
        &self,
        document: &Document,
        representation: Representation,
        operation: DecodedOperation,
    ) -> Result<DispatchOutcome, DispatchError> {
        let kind = operation.kind();
        let provider =
            self.providers
                .get(&(representation, kind))
                .ok_or(DispatchError::UnknownType {
                    representation,
                    kind,
                })?;
        trace!("[DISPATCH] {kind} operation in {representation}");

        let ctx = ProviderContext {
            document,
            representation,
        };
        match operation {
            DecodedOperation::CreateNode {
                kind,
                container,
                location,
                args,
            } => {
                let handle = ElementHandle::deferred();
                let request = CreateRequest {
                    kind,
                    container,
                    location,
                    source: None,
                    target: None,
                    args,
                };
                let compound = provider.create_modifications(&ctx, &request, &handle)?;
                Ok(DispatchOutcome {
                    action: ActionKind::Create,
                    subject: handle,
                    compound,
                })
            }
            DecodedOperation::CreateEdge {
                kind,
                container,
                source,
                target,
                args,
            } => {
                let handle = ElementHandle::deferred();
                let request = CreateRequest {
                    kind,
                    container,
                    location: None,
                    source,
                    target,
                    args,
                };
                let compound = provider.create_modifications(&ctx, &request, &handle)?;
                Ok(DispatchOutcome {
                    action: ActionKind::Create,
                    subject: handle,
                    compound,
                })
            }
            DecodedOperation::Update { element, args, .. } => {
                let compound = provider.update_modifications(&ctx, &element, &args)?;
                Ok(DispatchOutcome {
                    action: ActionKind::Update,
                    subject: ElementHandle::resolved(element),
                    compound,
                })
            }
            DecodedOperation::Delete { element, .. } => {
                let compound = provider.delete_modifications(&ctx, &element)?;
                Ok(DispatchOutcome {
                    action: ActionKind::Delete,
                    subject: ElementHandle::resolved(element),
                    compound,
                })
            }
        }
    }
}
