//! Built-in providers for the default vocabulary.

use crate::base::ElementId;
use crate::command::{
    AddEdgeNotationCommand, AddShapeNotationCommand, AddToReferenceCommand, CompoundCommand,
    CreateElementCommand, DeleteElementCommand, DeleteNotationCommand, ElementHandle, NoOpCommand,
    SetReferenceCommand, UpdateElementCommand,
};
use crate::metamodel::{all_features, ElementKind, FeatureId, ReferenceFeature};
use crate::reference::{CrossReferenceRemover, FeatureScope};

use super::arguments::OperationArgs;
use super::dispatcher::DispatchError;
use super::provider::{CommandProvider, CreateRequest, ProviderContext};

fn feature(id: FeatureId) -> ReferenceFeature {
    // The global table carries every feature id exactly once.
    *all_features()
        .iter()
        .find(|f| f.id == id)
        .expect("feature table covers every FeatureId")
}

/// Delete compilation shared by node and edge providers: semantic delete
/// first, then notation removal for the element and every owned
/// descendant, then cross-reference cleanup.
///
/// The notation targets and the cleanup commands are computed from the
/// pre-deletion graph (the referrers are only visible there) but appended
/// after the delete, so the whole thing applies as one transaction.
fn delete_compound(
    ctx: &ProviderContext<'_>,
    element: &ElementId,
) -> Result<CompoundCommand, DispatchError> {
    let kind = ctx.document.element(element)?.kind;
    let mut compound = CompoundCommand::new(format!("{}:remove_{}", kind, kind));

    let doomed = ctx.document.subtree_ids(element)?;
    compound.append(DeleteElementCommand::new(element.clone()));
    for id in doomed {
        compound.append(DeleteNotationCommand::new(id));
    }

    let remover = CrossReferenceRemover::new(FeatureScope::Global);
    compound.extend(remover.delete_commands_for(ctx.document, element)?);
    Ok(compound)
}

/// Provider for shape-projected kinds.
///
/// Create composes the semantic creation with shape placement, linked
/// through a deferred handle so the shape finds the element that does not
/// exist yet when the compound is built.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeCommandProvider;

impl CommandProvider for NodeCommandProvider {
    fn create_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        request: &CreateRequest,
        handle: &ElementHandle,
    ) -> Result<CompoundCommand, DispatchError> {
        let attributes = request.args.create_attributes(request.kind)?;
        let mut compound = CompoundCommand::new(format!("create_{}", request.kind));
        compound.append(CreateElementCommand::new(
            request.container.clone(),
            request.kind,
            attributes,
            handle.clone(),
        ));
        compound.append(AddShapeNotationCommand::new(
            ctx.representation,
            handle.clone(),
            request.location,
            None,
        ));
        Ok(compound)
    }

    fn update_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        element: &ElementId,
        args: &OperationArgs,
    ) -> Result<CompoundCommand, DispatchError> {
        let kind = ctx.document.element(element)?.kind;
        let mut compound = CompoundCommand::new(format!("update_{kind}"));
        compound.append(UpdateElementCommand::new(
            element.clone(),
            args.update_attributes()?,
        ));
        Ok(compound)
    }

    fn delete_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        element: &ElementId,
    ) -> Result<CompoundCommand, DispatchError> {
        delete_compound(ctx, element)
    }
}

/// Provider for relationship kinds.
///
/// Relationship elements owned by their source (generalizations,
/// includes, extends, package imports) are created under the source
/// element; the rest live under the operation's container.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeCommandProvider;

impl EdgeCommandProvider {
    fn owned_by_source(kind: ElementKind) -> bool {
        matches!(
            kind,
            ElementKind::Generalization
                | ElementKind::Include
                | ElementKind::Extend
                | ElementKind::PackageImport
        )
    }

    /// Reference commands wiring the new edge to its endpoints.
    fn reference_commands(
        kind: ElementKind,
        handle: &ElementHandle,
        source: &ElementId,
        target: &ElementId,
        compound: &mut CompoundCommand,
    ) {
        let set = |id: FeatureId, target: &ElementId, compound: &mut CompoundCommand| {
            compound.append(SetReferenceCommand::deferred(
                handle.clone(),
                feature(id),
                target.clone(),
            ));
        };
        let add = |id: FeatureId, target: &ElementId, compound: &mut CompoundCommand| {
            compound.append(AddToReferenceCommand::deferred(
                handle.clone(),
                feature(id),
                target.clone(),
            ));
        };

        match kind {
            ElementKind::Generalization => set(FeatureId::GeneralizationGeneral, target, compound),
            ElementKind::Include => set(FeatureId::IncludeAddition, target, compound),
            ElementKind::Extend => set(FeatureId::ExtendExtendedCase, target, compound),
            ElementKind::PackageImport => set(FeatureId::PackageImportImported, target, compound),
            ElementKind::Association => {
                add(FeatureId::AssociationEnds, source, compound);
                add(FeatureId::AssociationEnds, target, compound);
            }
            ElementKind::Dependency => {
                add(FeatureId::DependencyClient, source, compound);
                add(FeatureId::DependencySupplier, target, compound);
            }
            ElementKind::Message => {
                set(FeatureId::MessageSource, source, compound);
                set(FeatureId::MessageTarget, target, compound);
            }
            ElementKind::Transition => {
                set(FeatureId::TransitionSource, source, compound);
                set(FeatureId::TransitionTarget, target, compound);
            }
            _ => {}
        }
    }
}

impl CommandProvider for EdgeCommandProvider {
    fn create_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        request: &CreateRequest,
        handle: &ElementHandle,
    ) -> Result<CompoundCommand, DispatchError> {
        let mut compound = CompoundCommand::new(format!("create_{}", request.kind));

        let (Some(source), Some(target)) = (&request.source, &request.target) else {
            compound.append(NoOpCommand::new(format!(
                "create_{}: endpoint no longer resolves",
                request.kind
            )));
            return Ok(compound);
        };

        let parent = if Self::owned_by_source(request.kind) {
            source.clone()
        } else {
            request.container.clone()
        };

        compound.append(CreateElementCommand::new(
            parent,
            request.kind,
            request.args.create_attributes(request.kind)?,
            handle.clone(),
        ));
        Self::reference_commands(request.kind, handle, source, target, &mut compound);
        compound.append(AddEdgeNotationCommand::new(ctx.representation, handle.clone()));
        Ok(compound)
    }

    fn update_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        element: &ElementId,
        args: &OperationArgs,
    ) -> Result<CompoundCommand, DispatchError> {
        let kind = ctx.document.element(element)?.kind;
        let mut compound = CompoundCommand::new(format!("update_{kind}"));
        compound.append(UpdateElementCommand::new(
            element.clone(),
            args.update_attributes()?,
        ));
        Ok(compound)
    }

    fn delete_modifications(
        &self,
        ctx: &ProviderContext<'_>,
        element: &ElementId,
    ) -> Result<CompoundCommand, DispatchError> {
        delete_compound(ctx, element)
    }
}
