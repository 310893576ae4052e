//! Element kinds.
//!
//! A closed, extensible set of type tags for semantic elements. Adding a
//! diagram feature means adding a variant here plus entries in the feature
//! tables, the default mappers, and the default providers; nothing is
//! resolved by runtime type inspection.

use serde::{Deserialize, Serialize};

use crate::base::{Dimension, Representation};

/// The metatype of a semantic element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// The implicit document root.
    Model,

    // Namespaces
    Package,

    // Class diagram classifiers and members
    Class,
    Interface,
    Enumeration,
    Property,
    Operation,

    // Use-case diagram
    Actor,
    UseCase,

    // Sequence diagram
    Interaction,
    Lifeline,

    // State machine diagram
    StateMachine,
    State,
    Pseudostate,

    // Relationship (edge) elements
    Generalization,
    Association,
    Dependency,
    Include,
    Extend,
    Message,
    Transition,
    PackageImport,
}

impl ElementKind {
    /// Stable wire tag, e.g. `"use_case"`. Used in operation type strings
    /// (`use_case:remove_use_case`) and graphical type identifiers.
    pub fn type_id(&self) -> &'static str {
        match self {
            ElementKind::Model => "model",
            ElementKind::Package => "package",
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Enumeration => "enumeration",
            ElementKind::Property => "property",
            ElementKind::Operation => "operation",
            ElementKind::Actor => "actor",
            ElementKind::UseCase => "use_case",
            ElementKind::Interaction => "interaction",
            ElementKind::Lifeline => "lifeline",
            ElementKind::StateMachine => "state_machine",
            ElementKind::State => "state",
            ElementKind::Pseudostate => "pseudostate",
            ElementKind::Generalization => "generalization",
            ElementKind::Association => "association",
            ElementKind::Dependency => "dependency",
            ElementKind::Include => "include",
            ElementKind::Extend => "extend",
            ElementKind::Message => "message",
            ElementKind::Transition => "transition",
            ElementKind::PackageImport => "package_import",
        }
    }

    /// Reverse of [`ElementKind::type_id`].
    pub fn from_type_id(tag: &str) -> Option<ElementKind> {
        Self::ALL.iter().copied().find(|k| k.type_id() == tag)
    }

    /// Default display label, used as the element name when a create
    /// operation carries no `name` property.
    pub fn display_label(&self) -> &'static str {
        match self {
            ElementKind::Model => "Model",
            ElementKind::Package => "Package",
            ElementKind::Class => "Class",
            ElementKind::Interface => "Interface",
            ElementKind::Enumeration => "Enumeration",
            ElementKind::Property => "Property",
            ElementKind::Operation => "Operation",
            ElementKind::Actor => "Actor",
            ElementKind::UseCase => "UseCase",
            ElementKind::Interaction => "Interaction",
            ElementKind::Lifeline => "Lifeline",
            ElementKind::StateMachine => "StateMachine",
            ElementKind::State => "State",
            ElementKind::Pseudostate => "Pseudostate",
            ElementKind::Generalization => "Generalization",
            ElementKind::Association => "Association",
            ElementKind::Dependency => "Dependency",
            ElementKind::Include => "Include",
            ElementKind::Extend => "Extend",
            ElementKind::Message => "Message",
            ElementKind::Transition => "Transition",
            ElementKind::PackageImport => "PackageImport",
        }
    }

    /// Relationship elements are projected as edges, everything else as
    /// shapes.
    pub fn is_edge(&self) -> bool {
        matches!(
            self,
            ElementKind::Generalization
                | ElementKind::Association
                | ElementKind::Dependency
                | ElementKind::Include
                | ElementKind::Extend
                | ElementKind::Message
                | ElementKind::Transition
                | ElementKind::PackageImport
        )
    }

    /// Default shape size on creation when the client sends none.
    pub fn default_size(&self) -> Dimension {
        match self {
            ElementKind::Package | ElementKind::StateMachine => Dimension::new(160.0, 100.0),
            ElementKind::Class | ElementKind::Interface | ElementKind::Enumeration => {
                Dimension::new(160.0, 100.0)
            }
            ElementKind::Actor => Dimension::new(80.0, 120.0),
            ElementKind::UseCase | ElementKind::State => Dimension::new(120.0, 60.0),
            ElementKind::Interaction => Dimension::new(400.0, 300.0),
            ElementKind::Lifeline => Dimension::new(160.0, 50.0),
            ElementKind::Pseudostate => Dimension::new(30.0, 30.0),
            _ => Dimension::new(100.0, 40.0),
        }
    }

    pub const ALL: [ElementKind; 22] = [
        ElementKind::Model,
        ElementKind::Package,
        ElementKind::Class,
        ElementKind::Interface,
        ElementKind::Enumeration,
        ElementKind::Property,
        ElementKind::Operation,
        ElementKind::Actor,
        ElementKind::UseCase,
        ElementKind::Interaction,
        ElementKind::Lifeline,
        ElementKind::StateMachine,
        ElementKind::State,
        ElementKind::Pseudostate,
        ElementKind::Generalization,
        ElementKind::Association,
        ElementKind::Dependency,
        ElementKind::Include,
        ElementKind::Extend,
        ElementKind::Message,
        ElementKind::Transition,
        ElementKind::PackageImport,
    ];
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_id())
    }
}

/// Node kinds a representation can create and project.
pub fn node_kinds(representation: Representation) -> &'static [ElementKind] {
    match representation {
        Representation::Class => &[
            ElementKind::Package,
            ElementKind::Class,
            ElementKind::Interface,
            ElementKind::Enumeration,
            ElementKind::Property,
            ElementKind::Operation,
        ],
        Representation::UseCase => &[
            ElementKind::Package,
            ElementKind::Actor,
            ElementKind::UseCase,
        ],
        Representation::Sequence => &[ElementKind::Interaction, ElementKind::Lifeline],
        Representation::StateMachine => &[
            ElementKind::StateMachine,
            ElementKind::State,
            ElementKind::Pseudostate,
        ],
        Representation::Package => &[ElementKind::Package],
    }
}

/// Edge kinds a representation can create and project.
pub fn edge_kinds(representation: Representation) -> &'static [ElementKind] {
    match representation {
        Representation::Class => &[
            ElementKind::Generalization,
            ElementKind::Association,
            ElementKind::Dependency,
        ],
        Representation::UseCase => &[
            ElementKind::Generalization,
            ElementKind::Include,
            ElementKind::Extend,
        ],
        Representation::Sequence => &[ElementKind::Message],
        Representation::StateMachine => &[ElementKind::Transition],
        Representation::Package => &[ElementKind::Dependency, ElementKind::PackageImport],
    }
}
