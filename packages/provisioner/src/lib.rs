//! Meshport Provisioner Package
//!
//! Typed request/response wrappers around the server-provisioning REST API:
//! create a server bundling a set of agents, list servers, inspect one,
//! delete one, and create a chat. Every operation is a single round trip —
//! no retry, no backoff, no idempotency key. A caller-side retry of a
//! create can provision a duplicate server.

pub mod api;
pub mod client;
pub mod error;

pub use api::{
    ChatAck, CreateChatRequest, CreateServerRequest, DeleteServerResponse, ListServersResponse,
    ServerDetails, ServerSummary, ServerType,
};
pub use client::{ProvisionerClient, ProvisionerConfig};
pub use error::{ProvisionerError, ProvisionerResult};
