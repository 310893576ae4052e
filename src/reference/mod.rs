//! Cross-reference discovery and removal.
//!
//! A cross-reference is a directed, named edge
//! `(referencing element, feature, referenced element)` discovered by
//! walking the inverse of the model's reference fields. Cross-references
//! are never materialized; they are computed on demand when a deletion
//! needs to know who still points at the doomed element.

mod remover;

pub use remover::{CrossReference, CrossReferenceRemover, FeatureScope};
