//! The cross-reference remover.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::base::{ElementId, Representation};
use crate::command::{ClearReferenceCommand, Command, RemoveFromReferenceCommand};
use crate::metamodel::{all_features, feature_set, ReferenceFeature};
use crate::model::{Document, DocumentError, ReferenceValue};

/// A discovered inbound reference: `referencing.feature` points at
/// `referenced`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossReference {
    pub referencing: ElementId,
    pub feature: ReferenceFeature,
    pub referenced: ElementId,
}

/// Which feature tables a scan enumerates.
///
/// `Representation` bounds the scan to one diagram kind's features, the
/// original behavior. `Global` enumerates the union of every
/// representation's features so an element projected into several diagram
/// kinds cannot leave a dangling reference behind a feature the active
/// diagram does not know about; the built-in delete providers use this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureScope {
    Representation(Representation),
    Global,
}

impl FeatureScope {
    fn features(&self) -> &'static [ReferenceFeature] {
        match self {
            FeatureScope::Representation(representation) => feature_set(*representation),
            FeatureScope::Global => all_features(),
        }
    }
}

/// Finds every reference pointing into an element's owned subtree and
/// produces the commands that clean them up.
///
/// The remover is read-then-emit: it never mutates the document itself,
/// only returns commands for the caller to append to the deletion
/// compound. It must run against the pre-deletion graph — the referrers
/// are only discoverable while the doomed elements are still resolvable.
#[derive(Clone, Copy, Debug)]
pub struct CrossReferenceRemover {
    scope: FeatureScope,
}

impl CrossReferenceRemover {
    pub fn new(scope: FeatureScope) -> Self {
        Self { scope }
    }

    /// All inbound references to any element of `element`'s owned subtree,
    /// from elements that survive the deletion.
    pub fn references_into(
        &self,
        document: &Document,
        element: &ElementId,
    ) -> Result<Vec<CrossReference>, DocumentError> {
        let doomed: FxHashSet<ElementId> =
            document.subtree_ids(element)?.into_iter().collect();
        let mut found = Vec::new();

        for candidate in document.iter_elements() {
            if doomed.contains(candidate.id()) {
                continue;
            }
            for feature in self.scope.features() {
                if !feature.applies_to(candidate.kind) {
                    continue;
                }
                match candidate.reference(feature) {
                    ReferenceValue::Single(Some(target)) if doomed.contains(&target) => {
                        found.push(CrossReference {
                            referencing: candidate.id().clone(),
                            feature: *feature,
                            referenced: target,
                        });
                    }
                    ReferenceValue::Many(targets) => {
                        for target in targets {
                            if doomed.contains(&target) {
                                found.push(CrossReference {
                                    referencing: candidate.id().clone(),
                                    feature: *feature,
                                    referenced: target,
                                });
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        trace!(
            "[REMOVER] {} inbound reference(s) into subtree of {element}",
            found.len()
        );
        Ok(found)
    }

    /// Cleanup commands for deleting `element`: one `ClearReference` per
    /// single-valued hit, one `RemoveFromReference` per occurrence in a
    /// multi-valued feature. Exhaustive over the scope's feature table —
    /// a missed feature here is a dangling reference after commit.
    pub fn delete_commands_for(
        &self,
        document: &Document,
        element: &ElementId,
    ) -> Result<Vec<Box<dyn Command>>, DocumentError> {
        let commands = self
            .references_into(document, element)?
            .into_iter()
            .map(|reference| {
                let command: Box<dyn Command> = match reference.feature.multiplicity {
                    crate::metamodel::Multiplicity::Single => Box::new(ClearReferenceCommand::new(
                        reference.referencing,
                        reference.feature,
                    )),
                    crate::metamodel::Multiplicity::Many => {
                        Box::new(RemoveFromReferenceCommand::new(
                            reference.referencing,
                            reference.feature,
                            reference.referenced,
                        ))
                    }
                };
                command
            })
            .collect();
        Ok(commands)
    }
}
