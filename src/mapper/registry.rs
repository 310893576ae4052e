//! The mapper registry.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

use crate::base::{ElementId, Representation};
use crate::metamodel::ElementKind;
use crate::model::{Document, DocumentError, SemanticElement};

use super::node::GraphicalNode;

/// Errors raised by registration and mapping.
#[derive(Debug, Error)]
pub enum MapperError {
    /// No builder registered for the element's exact kind in this
    /// representation.
    #[error("no mapper found for kind '{kind}' in {representation} diagram")]
    NoMapperFound {
        representation: Representation,
        kind: ElementKind,
    },

    /// Two builders registered for the same (representation, kind) pair.
    /// Raised at registration time, never at lookup time.
    #[error("duplicate mapper for kind '{kind}' in {representation} diagram")]
    DuplicateMapper {
        representation: Representation,
        kind: ElementKind,
    },

    /// Batch mapping failed for one element; the ID says which.
    #[error("mapping failed for element {element}")]
    MapFailed {
        element: ElementId,
        #[source]
        source: Box<MapperError>,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Everything a mapper may consult while building a projection.
///
/// Mappers are read-only over the document; mapping never mutates state,
/// so a mapping failure cannot corrupt anything.
pub struct MapContext<'a> {
    pub document: &'a Document,
    pub registry: &'a MapperRegistry,
    pub representation: Representation,
}

impl MapContext<'_> {
    /// Map an owned child element, if its kind is registered in this
    /// representation. Unregistered kinds are not shown in this diagram.
    pub fn map_child(&self, child: &ElementId) -> Result<Option<GraphicalNode>, MapperError> {
        let element = self.document.element(child)?;
        if !self
            .registry
            .is_registered(self.representation, element.kind)
        {
            return Ok(None);
        }
        self.registry
            .map(self.document, self.representation, child)
            .map(Some)
    }
}

/// A graphical-projection builder for one (representation, kind) pair.
pub trait Mapper: Send + Sync {
    fn map(
        &self,
        ctx: &MapContext<'_>,
        element: &SemanticElement,
    ) -> Result<GraphicalNode, MapperError>;
}

/// Lookup table from (Representation, ElementKind) to a [`Mapper`].
#[derive(Default)]
pub struct MapperRegistry {
    mappers: FxHashMap<(Representation, ElementKind), Box<dyn Mapper>>,
}

impl MapperRegistry {
    /// An empty registry. Most callers want
    /// [`MapperRegistry::with_defaults`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder. Registering the same pair twice is a
    /// configuration error and fails immediately.
    pub fn register(
        &mut self,
        representation: Representation,
        kind: ElementKind,
        mapper: impl Mapper + 'static,
    ) -> Result<(), MapperError> {
        let key = (representation, kind);
        if self.mappers.contains_key(&key) {
            return Err(MapperError::DuplicateMapper {
                representation,
                kind,
            });
        }
        self.mappers.insert(key, Box::new(mapper));
        Ok(())
    }

    pub fn is_registered(&self, representation: Representation, kind: ElementKind) -> bool {
        self.mappers.contains_key(&(representation, kind))
    }

    /// Project one element into its graphical form.
    ///
    /// Geometry recorded in the representation's diagram is attached to
    /// the result; elements without notation map without geometry.
    pub fn map(
        &self,
        document: &Document,
        representation: Representation,
        element: &ElementId,
    ) -> Result<GraphicalNode, MapperError> {
        let semantic = document.element(element)?;
        let mapper = self
            .mappers
            .get(&(representation, semantic.kind))
            .ok_or(MapperError::NoMapperFound {
                representation,
                kind: semantic.kind,
            })?;

        trace!("[MAPPER] map {} as {} in {representation}", element, semantic.kind);
        let ctx = MapContext {
            document,
            registry: self,
            representation,
        };
        let mut node = mapper.map(&ctx, semantic)?;

        if let Some(notation) = document
            .diagram(representation)
            .and_then(|diagram| diagram.get(element))
        {
            if let Some(bounds) = notation.bounds() {
                node.position = Some(bounds.position);
                node.size = Some(bounds.size);
            }
            for (key, value) in &notation.style {
                node.args.insert(key.clone(), value.clone());
            }
        }
        Ok(node)
    }

    /// Order-preserving batch form of [`MapperRegistry::map`].
    ///
    /// Fails on the first unmappable element, naming it — a batch error
    /// that hides which element failed is undiagnosable.
    pub fn map_many(
        &self,
        document: &Document,
        representation: Representation,
        elements: &[ElementId],
    ) -> Result<Vec<GraphicalNode>, MapperError> {
        elements
            .iter()
            .map(|element| {
                self.map(document, representation, element)
                    .map_err(|source| MapperError::MapFailed {
                        element: element.clone(),
                        source: Box::new(source),
                    })
            })
            .collect()
    }
}
