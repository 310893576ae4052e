//! Graphical projection.
//!
//! Maps semantic elements back into the client-facing graphical form. The
//! registry is an explicit table keyed by `(Representation, ElementKind)`
//! built at process start — lookup is a map access, and there is no
//! implicit supertype fallback: every concrete kind must be registered or
//! mapping fails with [`MapperError::NoMapperFound`], which beats silently
//! mis-rendering a kind through some broader rule.

mod defaults;
mod node;
mod registry;

pub use defaults::{DefaultEdgeMapper, DefaultNodeMapper};
pub use node::GraphicalNode;
pub use registry::{MapContext, Mapper, MapperError, MapperRegistry};
