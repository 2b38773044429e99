//! Error types for the socket bridge.

use notimaster_api::GateError;

use crate::protocol::{HANDLER_NOT_READY, METHOD_NOT_FOUND, RpcError};
use crate::transport::CodecError;

/// Errors that can occur while talking to the host socket
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the request failed, so the host never saw it
    #[error("Failed to send request: {0}")]
    Unsent(#[source] CodecError),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Request timeout")]
    Timeout,

    #[error("Cannot block on the host from inside an async runtime")]
    InsideRuntime,
}

impl From<RpcError> for BridgeError {
    fn from(e: RpcError) -> Self {
        Self::Rpc {
            code: e.code,
            message: e.message,
        }
    }
}

impl BridgeError {
    /// Whether the host is simply absent: nothing listening on the socket, or
    /// no handler registered for the call.
    #[must_use]
    pub fn is_not_ready(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::ConnectionRefused
            ),
            Self::Rpc { code, .. } => matches!(*code, METHOD_NOT_FOUND | HANDLER_NOT_READY),
            _ => false,
        }
    }

    /// Whether the request can safely go out again on a fresh connection.
    ///
    /// Only a socket-level write failure qualifies; an oversized frame would
    /// fail the same way twice.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unsent(CodecError::Io(_)))
    }

    /// Translate into the capability error the facade understands.
    #[must_use]
    pub fn into_gate_error(self, identifier: &str) -> GateError {
        if self.is_not_ready() {
            return GateError::not_ready(identifier);
        }

        match self {
            Self::Rpc { code, message } => GateError::host(identifier, code, message),
            other => GateError::transport(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
