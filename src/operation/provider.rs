//! The command-provider capability.

use crate::base::{ElementId, Point, Representation};
use crate::command::{CompoundCommand, ElementHandle};
use crate::metamodel::ElementKind;
use crate::model::Document;

use super::arguments::OperationArgs;
use super::dispatcher::DispatchError;

/// Context passed into every provider call.
///
/// Providers read the document to compose commands but never mutate it;
/// mutation happens only when the returned compound executes.
pub struct ProviderContext<'a> {
    pub document: &'a Document,
    pub representation: Representation,
}

/// A resolved create operation, node or edge.
#[derive(Debug)]
pub struct CreateRequest {
    pub kind: ElementKind,
    pub container: ElementId,
    /// Container-relative position (nodes only).
    pub location: Option<Point>,
    /// Edge endpoints; `None` means the client named an ID that no longer
    /// resolves.
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub args: OperationArgs,
}

/// Compiles operations on one element kind into compound commands.
///
/// Each (representation, kind, action) triple is handled by exactly one
/// provider; the registry enforces that at registration time. Providers
/// are small capability objects composed into the dispatch table, not a
/// class hierarchy.
pub trait CommandProvider: Send + Sync {
    /// Compile a create operation. `handle` is filled with the created
    /// element's ID at execute time; the dispatcher uses it to map the
    /// result for the response.
    fn create_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        request: &CreateRequest,
        handle: &ElementHandle,
    ) -> Result<CompoundCommand, DispatchError>;

    /// Compile an update operation.
    fn update_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        element: &ElementId,
        args: &OperationArgs,
    ) -> Result<CompoundCommand, DispatchError>;

    /// Compile a delete operation: semantic delete, notation delete, and
    /// cross-reference cleanup in one transaction.
    fn delete_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        element: &ElementId,
    ) -> Result<CompoundCommand, DispatchError>;
}
