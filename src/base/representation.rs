//! Enumerated diagram kinds.

use serde::{Deserialize, Serialize};

/// A diagram kind.
///
/// The representation scopes which mappers, command providers and
/// reference-feature tables apply. One semantic element may be projected
/// into several representations at once, each with its own notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    Class,
    UseCase,
    Sequence,
    StateMachine,
    Package,
}

impl Representation {
    /// All known representations, in declaration order.
    pub const ALL: [Representation; 5] = [
        Representation::Class,
        Representation::UseCase,
        Representation::Sequence,
        Representation::StateMachine,
        Representation::Package,
    ];

    /// Stable prefix used in graphical type identifiers,
    /// e.g. `class:node:interface`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Representation::Class => "class",
            Representation::UseCase => "usecase",
            Representation::Sequence => "sequence",
            Representation::StateMachine => "statemachine",
            Representation::Package => "package",
        }
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}
