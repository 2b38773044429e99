//! Socket bridge to a `NotificationMaster` host.
//!
//! [`SocketGate`] implements [`notimaster_api::CallGate`] by sending each call
//! as a JSON-RPC 2.0 request over a Unix socket.
//!
//! # Architecture
//!
//! - [`protocol`]: JSON-RPC 2.0 message types and error codes
//! - [`transport`]: Length-prefixed codec for message framing
//! - [`client`]: Async client that matches responses to requests
//! - [`bridge`]: Blocking gate the facade plugs into
//! - [`config`]: Socket path and timeout
//! - [`error`]: Bridge errors and their mapping onto gate errors
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use notimaster_api::NotificationMasterApi;
//! use notimaster_rpc::{GateConfig, SocketGate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gate = SocketGate::new(GateConfig::default())?;
//! let api = NotificationMasterApi::new(Arc::new(gate));
//!
//! if api.is_ready()? {
//!     api.display_notification(Some("Retainers"), "Ventures complete")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;

pub use bridge::SocketGate;
pub use client::RpcClient;
pub use config::{GateConfig, socket_path};
pub use error::{BridgeError, Result};
pub use protocol::{
    HANDLER_NOT_READY, INTERNAL_ERROR, JSONRPC_VERSION, METHOD_NOT_FOUND, Message, Request,
    RequestId, Response, RpcError,
};
pub use transport::{CodecError, FrameCodec, MAX_FRAME_SIZE};
