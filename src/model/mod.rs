//! The document model.
//!
//! A document owns two mutually consistent layers:
//!
//! ```text
//! Document
//! ├── elements: IndexMap<ElementId, SemanticElement>  (insertion order)
//! ├── diagrams: one Diagram per active Representation
//! └── retired:  IDs that must never be handed out again
//! ```
//!
//! The semantic layer is the typed domain graph: an acyclic ownership tree
//! plus non-owning reference fields that may form cycles. The notation
//! layer projects semantic elements into per-diagram shapes and edges.
//!
//! The document itself enforces referential integrity only — whether a
//! mutation is *legal* is decided by the commands that drive it. All
//! mutating methods are crate-internal so they are reachable solely
//! through command application.

mod document;
mod notation;
mod semantic;

pub use document::{DetachedSubtree, Document, DocumentError};
pub use notation::{Diagram, NotationElement, NotationForm};
pub use semantic::{ReferenceValue, SemanticElement};
