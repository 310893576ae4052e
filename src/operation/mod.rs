//! Inbound operations.
//!
//! An operation arrives as an untyped payload ([`RequestOperation`]), is
//! decoded against the document into a [`DecodedOperation`] (all ID
//! resolution and argument typing happens here, before any mutation), and
//! is then dispatched to the single [`CommandProvider`] registered for its
//! (representation, kind) pair, which compiles it into a
//! [`CompoundCommand`](crate::command::CompoundCommand).

mod arguments;
mod dispatcher;
mod provider;
mod providers;
mod request;

pub use arguments::{OperationArgs, Visibility};
pub use dispatcher::{ActionKind, DispatchError, DispatchOutcome, ProviderRegistry};
pub use provider::{CommandProvider, CreateRequest, ProviderContext};
pub use providers::{EdgeCommandProvider, NodeCommandProvider};
pub use request::{DecodeError, DecodedOperation, OperationDecoder, RequestOperation};
