//! Service client adapter.
//!
//! Turns typed domain calls (register, connect, page create/update/delete/
//! get/list) into single transport calls against static routes, and turns
//! every outcome into either a decoded value or a
//! [`ServiceError`](crate::error::ServiceError).
//!
//! The adapter never touches [`ClientState`](crate::core::ClientState);
//! callers feed its results back into the state machine themselves.

mod client;
mod codec;
mod memory;
mod request;
mod route;
mod transport;

pub use client::{Service, ServiceResult};
pub use codec::{CodecError, UnknownWireFormat, WireFormat};
pub use memory::MemoryTransport;
pub use request::{
    ConnectRequest, Empty, PageCreateRequest, PageDeleteRequest, PageGetRequest,
    PageUpdateRequest, RegisterRequest,
};
pub use route::{AccountRoute, PageRoute, Route};
pub use transport::{StatusCode, Transport, TransportFailure};
