//! Daemon JSON-RPC interface
//!
//! `protocol` holds the request/response shapes, `server` the axum router that feeds them
//! to the shared [`ChainState`](crate::core::ChainState).

pub mod protocol;
pub mod server;

pub use protocol::{RpcError, RpcMethod, RpcRequest, RpcResponse};
pub use server::{dispatch, router, serve, serve_listener, JSON_RPC_PATH};
