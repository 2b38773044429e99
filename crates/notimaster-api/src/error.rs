//! Error types for the notimaster-api crate.
//!
//! Two layers: [`GateError`] is what a dispatch capability reports, and
//! [`ApiError`] is what the facade hands back to its caller once the
//! not-ready case has been folded into a `false` result.

use crate::names::Call;

/// Failure reported by a [`CallGate`](crate::gate::CallGate)
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// No handler is registered under the identifier. Expected whenever the
    /// host plugin is not installed or has not finished loading.
    #[error("No handler registered for {call}")]
    NotReady { call: String },

    /// The handler ran and reported a failure of its own
    #[error("Host error {code} from {call}: {message}")]
    Host {
        call: String,
        code: i32,
        message: String,
    },

    /// The capability could not carry the call to the host
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GateError {
    #[must_use]
    pub fn not_ready(call: impl Into<String>) -> Self {
        Self::NotReady { call: call.into() }
    }

    #[must_use]
    pub fn host(call: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self::Host {
            call: call.into(),
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    #[must_use]
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}

/// Errors surfaced by [`NotificationMasterApi`](crate::api::NotificationMasterApi)
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An operation ran before a dispatch capability was attached. This is an
    /// integration bug, never a runtime condition.
    #[error("NotificationMaster API was called before it was initialized")]
    Uninitialized,

    #[error(transparent)]
    Gate(#[from] GateError),

    /// `PlaySound` volume that has no JSON representation
    #[error("Sound volume must be finite, got {0}")]
    InvalidVolume(f32),

    #[error("Unexpected return value from {call}: {source}")]
    UnexpectedReturn {
        call: Call,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
