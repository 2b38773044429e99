//! The dispatch capability the host integration supplies.
//!
//! A gate resolves a call identifier to whatever handler the host registered
//! under it and invokes that handler with positional arguments. The facade
//! only ever talks to the host through this trait, so production code plugs in
//! a real bridge (see `notimaster-rpc`) and tests plug in a stand-in.

use serde_json::Value;

use crate::error::GateError;

/// Invoke-by-name capability provided by the host runtime.
///
/// Implementations must report a missing handler as [`GateError::NotReady`];
/// the facade relies on that variant to tell "host not installed" apart from
/// real failures.
pub trait CallGate: Send + Sync {
    /// Invoke the handler registered under `identifier` and return its value.
    ///
    /// Calls that produce no value return [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`GateError::NotReady`] when no handler is registered, and any
    /// other variant for failures while reaching or running the handler.
    fn invoke(&self, identifier: &str, args: Vec<Value>) -> Result<Value, GateError>;
}

impl<G: CallGate + ?Sized> CallGate for &G {
    fn invoke(&self, identifier: &str, args: Vec<Value>) -> Result<Value, GateError> {
        (**self).invoke(identifier, args)
    }
}

impl<G: CallGate + ?Sized> CallGate for Box<G> {
    fn invoke(&self, identifier: &str, args: Vec<Value>) -> Result<Value, GateError> {
        (**self).invoke(identifier, args)
    }
}

impl<G: CallGate + ?Sized> CallGate for std::sync::Arc<G> {
    fn invoke(&self, identifier: &str, args: Vec<Value>) -> Result<Value, GateError> {
        (**self).invoke(identifier, args)
    }
}
