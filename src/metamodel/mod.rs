//! The element-kind vocabulary the engine is built over.
//!
//! The engine itself is metamodel-independent: every place that needs to
//! know "what kinds exist" or "which fields can point at other elements"
//! goes through the tables in this module instead of reflecting over
//! concrete types. Lookup is a table access built at process start; a
//! missing entry fails fast at registration where possible.

mod features;
mod kind;

pub use features::{FeatureId, Multiplicity, ReferenceFeature, all_features, feature_set};
pub use kind::{ElementKind, edge_kinds, node_kinds};
