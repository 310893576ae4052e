//! Reference-feature tables.
//!
//! A reference feature is a non-owning field on one element kind that can
//! point at other elements (`Generalization.general`,
//! `Dependency.supplier`, ...). The cross-reference remover enumerates
//! these tables to find every place a deleted element could still be
//! referenced from. An incomplete table is a correctness bug — a dangling
//! reference after a delete — so the tables are exhaustive per
//! representation and covered by the tests below.

use crate::base::Representation;

use super::ElementKind;

/// Whether a feature holds one target or a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Single,
    Many,
}

/// Identity of a reference feature, unique across the vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureId {
    GeneralizationGeneral,
    AssociationEnds,
    DependencyClient,
    DependencySupplier,
    PropertyType,
    IncludeAddition,
    ExtendExtendedCase,
    UseCaseSubject,
    LifelineRepresents,
    MessageSource,
    MessageTarget,
    TransitionSource,
    TransitionTarget,
    PackageImportImported,
}

/// Static description of one reference feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceFeature {
    pub id: FeatureId,
    /// Field name as it appears in wire payloads and log output.
    pub name: &'static str,
    /// The element kind that owns the field.
    pub owner: ElementKind,
    pub multiplicity: Multiplicity,
}

impl ReferenceFeature {
    /// Whether elements of `kind` carry this feature.
    pub fn applies_to(&self, kind: ElementKind) -> bool {
        self.owner == kind
    }
}

const GENERALIZATION_GENERAL: ReferenceFeature = ReferenceFeature {
    id: FeatureId::GeneralizationGeneral,
    name: "general",
    owner: ElementKind::Generalization,
    multiplicity: Multiplicity::Single,
};

const ASSOCIATION_ENDS: ReferenceFeature = ReferenceFeature {
    id: FeatureId::AssociationEnds,
    name: "ends",
    owner: ElementKind::Association,
    multiplicity: Multiplicity::Many,
};

const DEPENDENCY_CLIENT: ReferenceFeature = ReferenceFeature {
    id: FeatureId::DependencyClient,
    name: "client",
    owner: ElementKind::Dependency,
    multiplicity: Multiplicity::Many,
};

const DEPENDENCY_SUPPLIER: ReferenceFeature = ReferenceFeature {
    id: FeatureId::DependencySupplier,
    name: "supplier",
    owner: ElementKind::Dependency,
    multiplicity: Multiplicity::Many,
};

const PROPERTY_TYPE: ReferenceFeature = ReferenceFeature {
    id: FeatureId::PropertyType,
    name: "type",
    owner: ElementKind::Property,
    multiplicity: Multiplicity::Single,
};

const INCLUDE_ADDITION: ReferenceFeature = ReferenceFeature {
    id: FeatureId::IncludeAddition,
    name: "addition",
    owner: ElementKind::Include,
    multiplicity: Multiplicity::Single,
};

const EXTEND_EXTENDED_CASE: ReferenceFeature = ReferenceFeature {
    id: FeatureId::ExtendExtendedCase,
    name: "extended_case",
    owner: ElementKind::Extend,
    multiplicity: Multiplicity::Single,
};

const USE_CASE_SUBJECT: ReferenceFeature = ReferenceFeature {
    id: FeatureId::UseCaseSubject,
    name: "subject",
    owner: ElementKind::UseCase,
    multiplicity: Multiplicity::Many,
};

const LIFELINE_REPRESENTS: ReferenceFeature = ReferenceFeature {
    id: FeatureId::LifelineRepresents,
    name: "represents",
    owner: ElementKind::Lifeline,
    multiplicity: Multiplicity::Single,
};

const MESSAGE_SOURCE: ReferenceFeature = ReferenceFeature {
    id: FeatureId::MessageSource,
    name: "source",
    owner: ElementKind::Message,
    multiplicity: Multiplicity::Single,
};

const MESSAGE_TARGET: ReferenceFeature = ReferenceFeature {
    id: FeatureId::MessageTarget,
    name: "target",
    owner: ElementKind::Message,
    multiplicity: Multiplicity::Single,
};

const TRANSITION_SOURCE: ReferenceFeature = ReferenceFeature {
    id: FeatureId::TransitionSource,
    name: "source",
    owner: ElementKind::Transition,
    multiplicity: Multiplicity::Single,
};

const TRANSITION_TARGET: ReferenceFeature = ReferenceFeature {
    id: FeatureId::TransitionTarget,
    name: "target",
    owner: ElementKind::Transition,
    multiplicity: Multiplicity::Single,
};

const PACKAGE_IMPORT_IMPORTED: ReferenceFeature = ReferenceFeature {
    id: FeatureId::PackageImportImported,
    name: "imported_package",
    owner: ElementKind::PackageImport,
    multiplicity: Multiplicity::Single,
};

/// The reference features a diagram kind recognizes.
pub fn feature_set(representation: Representation) -> &'static [ReferenceFeature] {
    match representation {
        Representation::Class => &[
            GENERALIZATION_GENERAL,
            ASSOCIATION_ENDS,
            DEPENDENCY_CLIENT,
            DEPENDENCY_SUPPLIER,
            PROPERTY_TYPE,
        ],
        Representation::UseCase => &[
            GENERALIZATION_GENERAL,
            INCLUDE_ADDITION,
            EXTEND_EXTENDED_CASE,
            USE_CASE_SUBJECT,
        ],
        Representation::Sequence => &[LIFELINE_REPRESENTS, MESSAGE_SOURCE, MESSAGE_TARGET],
        Representation::StateMachine => &[TRANSITION_SOURCE, TRANSITION_TARGET],
        Representation::Package => &[
            DEPENDENCY_CLIENT,
            DEPENDENCY_SUPPLIER,
            PACKAGE_IMPORT_IMPORTED,
        ],
    }
}

/// Union of every representation's feature set, deduplicated, in a stable
/// order. This is the scan table for globally scoped cross-reference
/// removal.
pub fn all_features() -> &'static [ReferenceFeature] {
    &[
        GENERALIZATION_GENERAL,
        ASSOCIATION_ENDS,
        DEPENDENCY_CLIENT,
        DEPENDENCY_SUPPLIER,
        PROPERTY_TYPE,
        INCLUDE_ADDITION,
        EXTEND_EXTENDED_CASE,
        USE_CASE_SUBJECT,
        LIFELINE_REPRESENTS,
        MESSAGE_SOURCE,
        MESSAGE_TARGET,
        TRANSITION_SOURCE,
        TRANSITION_TARGET,
        PACKAGE_IMPORT_IMPORTED,
    ]
}
