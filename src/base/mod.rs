//! Foundation types for the easel editing core.
//!
//! This module provides fundamental types used throughout the engine:
//! - [`ElementId`] - Stable semantic element identifiers
//! - [`Point`], [`Dimension`], [`Bounds`] - Notation geometry
//! - [`Representation`] - Enumerated diagram kinds
//!
//! This module has NO dependencies on other easel modules.

mod geometry;
mod id;
mod representation;

pub use geometry::{Bounds, Dimension, Point};
pub use id::ElementId;
pub use representation::Representation;
