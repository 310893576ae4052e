//! # easel-base
//!
//! Core library for collaborative model diagram editing: semantic graph,
//! notation projection, and edit-command compilation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! session   → per-document editing session, operation pipeline
//!   ↓
//! operation → inbound operation decode, command provider dispatch
//!   ↓
//! mapper    → (Representation, ElementKind) → graphical projection
//!   ↓
//! reference → cross-reference discovery and removal
//!   ↓
//! command   → Command / CompoundCommand / CommandStack
//!   ↓
//! model     → Document (semantic graph + notation layer), ID assignment
//!   ↓
//! metamodel → element kinds, reference-feature tables, defaults
//!   ↓
//! base      → Primitives (ElementId, geometry, Representation)
//! ```

// ============================================================================
// MODULES (dependency order: base → metamodel → model → command → reference
// → mapper → operation → session)
// ============================================================================

/// Foundation types: ElementId, Point/Dimension/Bounds, Representation
pub mod base;

/// Element kind vocabulary and reference-feature tables
pub mod metamodel;

/// Document model: semantic element graph and notation diagrams
pub mod model;

/// Atomic commands, compound transactions, undo stack
pub mod command;

/// Cross-reference discovery and removal
pub mod reference;

/// Graphical projection: GraphicalNode builders and the mapper registry
pub mod mapper;

/// Inbound operations: decoding, arguments, command providers, dispatch
pub mod operation;

/// Editing sessions: operation pipeline, locking, lifecycle
pub mod session;

// Re-export foundation types
pub use base::{Bounds, Dimension, ElementId, Point, Representation};
pub use metamodel::ElementKind;
pub use session::{EditError, EditResponse, EditorSession};
