//! Client API for the `NotificationMaster` host plugin.
//!
//! The host plugin renders tray notifications, flashes the taskbar, plays
//! sounds and raises its window. This crate only names those calls and
//! invokes them through a dispatch capability the host integration supplies.
//!
//! # Architecture
//!
//! - [`names`]: Identifiers the host registers each call under
//! - [`gate`]: The [`CallGate`] capability trait
//! - [`api`]: [`NotificationMasterApi`], the typed facade
//! - [`sound`]: [`SoundRequest`] builder for sound playback
//! - [`error`]: Error types and `Result` alias
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use notimaster_api::{CallGate, GateError, NotificationMasterApi};
//! use serde_json::Value;
//!
//! // A host that has not loaded yet
//! struct Absent;
//!
//! impl CallGate for Absent {
//!     fn invoke(&self, identifier: &str, _args: Vec<Value>) -> Result<Value, GateError> {
//!         Err(GateError::not_ready(identifier))
//!     }
//! }
//!
//! # fn main() -> notimaster_api::Result<()> {
//! let api = NotificationMasterApi::new(Arc::new(Absent));
//! assert!(!api.display_text("Duty has begun")?);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod gate;
pub mod names;
pub mod sound;

pub use api::NotificationMasterApi;
pub use error::{ApiError, GateError, Result};
pub use gate::CallGate;
pub use names::{Call, UnknownCall};
pub use sound::SoundRequest;
