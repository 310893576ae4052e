//! Inbound operation payloads and decoding.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;
use tracing::warn;

use crate::base::{ElementId, Point, Representation};
use crate::metamodel::ElementKind;
use crate::model::Document;

use super::arguments::OperationArgs;

/// The transport-agnostic operation payload.
///
/// Recognized `type` strings: `create_node` and `create_edge` (element
/// kind in the `element_kind` property), `update_<kind>`, and
/// `<kind>:remove_<kind>`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOperation {
    #[serde(rename = "type")]
    pub op_type: String,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub element_id: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub target_id: Option<String>,
    /// Absolute diagram coordinate; translated to a container-relative
    /// position during decoding.
    #[serde(default)]
    pub location: Option<Point>,
}

/// Decode-stage failures. All of these reject the operation before any
/// mutation, so they never require rollback.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized operation type '{0}'")]
    UnknownOperation(String),

    #[error("unknown element kind '{0}'")]
    UnknownElementKind(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("malformed value for property '{key}': {message}")]
    MalformedProperty { key: SmolStr, message: String },

    /// A `containerId`/`elementId` did not resolve.
    #[error("unresolved {role} reference: {id}")]
    UnresolvedReference { role: &'static str, id: ElementId },

    /// The resolved element is not of the kind the operation names.
    #[error("operation targets a '{expected}' but {id} is a '{actual}'")]
    KindMismatch {
        expected: ElementKind,
        actual: ElementKind,
        id: ElementId,
    },
}

/// A fully resolved, typed operation ready for dispatch.
#[derive(Debug)]
pub enum DecodedOperation {
    CreateNode {
        kind: ElementKind,
        container: ElementId,
        /// Container-relative position, if the client sent a location.
        location: Option<Point>,
        args: OperationArgs,
    },
    CreateEdge {
        kind: ElementKind,
        container: ElementId,
        /// `None` when the named ID no longer resolves; the provider
        /// degrades the operation to a no-op instead of failing.
        source: Option<ElementId>,
        target: Option<ElementId>,
        args: OperationArgs,
    },
    Update {
        kind: ElementKind,
        element: ElementId,
        args: OperationArgs,
    },
    Delete {
        kind: ElementKind,
        element: ElementId,
    },
}

impl DecodedOperation {
    /// The element kind the provider lookup keys on.
    pub fn kind(&self) -> ElementKind {
        match self {
            DecodedOperation::CreateNode { kind, .. }
            | DecodedOperation::CreateEdge { kind, .. }
            | DecodedOperation::Update { kind, .. }
            | DecodedOperation::Delete { kind, .. } => *kind,
        }
    }
}

/// Decodes raw operations against one document and representation.
pub struct OperationDecoder<'a> {
    document: &'a Document,
    representation: Representation,
}

impl<'a> OperationDecoder<'a> {
    pub fn new(document: &'a Document, representation: Representation) -> Self {
        Self {
            document,
            representation,
        }
    }

    pub fn decode(&self, operation: &RequestOperation) -> Result<DecodedOperation, DecodeError> {
        let op_type = operation.op_type.as_str();
        if op_type == "create_node" || op_type == "create_edge" {
            return self.decode_create(operation, op_type == "create_edge");
        }
        if let Some(tag) = op_type.strip_prefix("update_") {
            return self.decode_update(operation, tag);
        }
        if let Some((prefix, suffix)) = op_type.split_once(':') {
            if suffix.strip_prefix("remove_") == Some(prefix) {
                return self.decode_delete(operation, prefix);
            }
        }
        Err(DecodeError::UnknownOperation(operation.op_type.clone()))
    }

    fn decode_create(
        &self,
        operation: &RequestOperation,
        edge: bool,
    ) -> Result<DecodedOperation, DecodeError> {
        let tag = operation
            .properties
            .get("element_kind")
            .ok_or(DecodeError::MissingField("element_kind"))?;
        let kind = ElementKind::from_type_id(tag)
            .filter(|kind| kind.is_edge() == edge)
            .ok_or_else(|| DecodeError::UnknownElementKind(tag.clone()))?;

        let container = self.resolve_container(operation)?;
        let args = OperationArgs::new(operation.properties.clone());

        if edge {
            let source = self.resolve_endpoint(operation.source_id.as_deref(), "sourceId")?;
            let target = self.resolve_endpoint(operation.target_id.as_deref(), "targetId")?;
            Ok(DecodedOperation::CreateEdge {
                kind,
                container,
                source,
                target,
                args,
            })
        } else {
            let location = operation
                .location
                .map(|absolute| {
                    self.document
                        .relative_location(self.representation, &container, absolute)
                })
                .transpose()
                .map_err(|_| DecodeError::UnresolvedReference {
                    role: "container",
                    id: container.clone(),
                })?;
            Ok(DecodedOperation::CreateNode {
                kind,
                container,
                location,
                args,
            })
        }
    }

    fn decode_update(
        &self,
        operation: &RequestOperation,
        tag: &str,
    ) -> Result<DecodedOperation, DecodeError> {
        let kind = ElementKind::from_type_id(tag)
            .ok_or_else(|| DecodeError::UnknownElementKind(tag.to_owned()))?;
        let element = self.resolve_element(operation, kind)?;
        Ok(DecodedOperation::Update {
            kind,
            element,
            args: OperationArgs::new(operation.properties.clone()),
        })
    }

    fn decode_delete(
        &self,
        operation: &RequestOperation,
        tag: &str,
    ) -> Result<DecodedOperation, DecodeError> {
        let kind = ElementKind::from_type_id(tag)
            .ok_or_else(|| DecodeError::UnknownElementKind(tag.to_owned()))?;
        let element = self.resolve_element(operation, kind)?;
        Ok(DecodedOperation::Delete { kind, element })
    }

    /// `containerId` resolution; absent means the document root.
    fn resolve_container(&self, operation: &RequestOperation) -> Result<ElementId, DecodeError> {
        match operation.container_id.as_deref() {
            None => Ok(self.document.root().clone()),
            Some(raw) => {
                let id = ElementId::from(raw);
                if self.document.resolve(&id).is_none() {
                    return Err(DecodeError::UnresolvedReference {
                        role: "container",
                        id,
                    });
                }
                Ok(id)
            }
        }
    }

    /// `elementId` resolution, checking the kind matches the operation.
    fn resolve_element(
        &self,
        operation: &RequestOperation,
        expected: ElementKind,
    ) -> Result<ElementId, DecodeError> {
        let raw = operation
            .element_id
            .as_deref()
            .ok_or(DecodeError::MissingField("elementId"))?;
        let id = ElementId::from(raw);
        let element = self
            .document
            .resolve(&id)
            .ok_or_else(|| DecodeError::UnresolvedReference {
                role: "element",
                id: id.clone(),
            })?;
        if element.kind != expected {
            return Err(DecodeError::KindMismatch {
                expected,
                actual: element.kind,
                id,
            });
        }
        Ok(id)
    }

    /// Edge endpoints resolve leniently: the field must be present, but a
    /// stale ID degrades to `None` — the model may have changed between
    /// client intent and server receipt.
    fn resolve_endpoint(
        &self,
        raw: Option<&str>,
        field: &'static str,
    ) -> Result<Option<ElementId>, DecodeError> {
        let raw = raw.ok_or(DecodeError::MissingField(field))?;
        let id = ElementId::from(raw);
        if self.document.resolve(&id).is_none() {
            warn!("[DECODE] {field} {id} no longer resolves, degrading to no-op");
            return Ok(None);
        }
        Ok(Some(id))
    }
}
