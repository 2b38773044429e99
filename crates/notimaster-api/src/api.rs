//! Client facade over the `NotificationMaster` host calls.
//!
//! Every operation follows the same path: make sure a gate is attached,
//! resolve the call's identifier, invoke it, and turn a not-ready answer into
//! `Ok(false)`. Nothing else is filtered; other gate failures come back as
//! [`ApiError::Gate`] untouched.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::error::{ApiError, Result};
use crate::gate::CallGate;
use crate::names::Call;
use crate::sound::SoundRequest;

/// Typed access to the host plugin.
///
/// The host does not have to be installed. When it is missing every call
/// simply returns `Ok(false)`; there is no need to probe first.
#[derive(Clone, Default)]
pub struct NotificationMasterApi {
    gate: Option<Arc<dyn CallGate>>,
}

impl fmt::Debug for NotificationMasterApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationMasterApi")
            .field("attached", &self.gate.is_some())
            .finish()
    }
}

impl NotificationMasterApi {
    #[must_use]
    pub fn new(gate: Arc<dyn CallGate>) -> Self {
        Self { gate: Some(gate) }
    }

    /// Facade with no gate yet. Every operation fails with
    /// [`ApiError::Uninitialized`] until [`attach`](Self::attach) is called.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, gate: Arc<dyn CallGate>) {
        self.gate = Some(gate);
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.gate.is_some()
    }

    /// Check whether the host accepts requests.
    ///
    /// Not needed before other calls; useful only to find out whether the
    /// plugin is installed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Uninitialized`] without a gate, or the gate's error
    /// for failures other than not-ready.
    pub fn is_ready(&self) -> Result<bool> {
        Ok(self.dispatch(Call::Probe, Vec::new())?.is_some())
    }

    /// Display a tray notification with no title.
    ///
    /// # Errors
    ///
    /// See [`display_notification`](Self::display_notification).
    pub fn display_text(&self, text: &str) -> Result<bool> {
        self.display_notification(None, text)
    }

    /// Display a tray notification.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Uninitialized`] without a gate, the gate's error for
    /// failures other than not-ready, or [`ApiError::UnexpectedReturn`] if the
    /// host answers with something other than a bool.
    pub fn display_notification(&self, title: Option<&str>, text: &str) -> Result<bool> {
        self.call_bool(Call::DisplayToast, vec![json!(title), json!(text)])
    }

    /// Flash the host window's taskbar icon.
    ///
    /// # Errors
    ///
    /// Same as [`display_notification`](Self::display_notification).
    pub fn flash_taskbar_icon(&self) -> Result<bool> {
        self.call_bool(Call::FlashTaskbar, Vec::new())
    }

    /// Ask for the host window to be brought to the foreground.
    ///
    /// Best effort: window managers may refuse focus changes, so `false` does
    /// not prove the window stayed in the background.
    ///
    /// # Errors
    ///
    /// Same as [`display_notification`](Self::display_notification).
    pub fn try_bring_foreground(&self) -> Result<bool> {
        self.call_bool(Call::BringForeground, Vec::new())
    }

    /// Start playing a sound file, replacing whatever the host is playing.
    ///
    /// # Errors
    ///
    /// Same as [`display_notification`](Self::display_notification), plus
    /// [`ApiError::InvalidVolume`] when `volume` is NaN or infinite.
    pub fn play_sound(
        &self,
        path: &str,
        volume: f32,
        repeat: bool,
        stop_on_focus: bool,
    ) -> Result<bool> {
        self.play(&SoundRequest {
            path: path.to_string(),
            volume,
            repeat,
            stop_on_focus,
        })
    }

    /// Start playing a sound described by a [`SoundRequest`].
    ///
    /// # Errors
    ///
    /// Same as [`play_sound`](Self::play_sound).
    pub fn play(&self, request: &SoundRequest) -> Result<bool> {
        self.gate()?;
        self.call_bool(Call::PlaySound, request.to_args()?)
    }

    /// Stop the sound started by [`play_sound`](Self::play_sound).
    ///
    /// # Errors
    ///
    /// Same as [`display_notification`](Self::display_notification).
    pub fn stop_sound(&self) -> Result<bool> {
        self.call_bool(Call::StopSound, Vec::new())
    }

    fn call_bool(&self, call: Call, args: Vec<Value>) -> Result<bool> {
        match self.dispatch(call, args)? {
            Some(value) => decode(call, value),
            None => Ok(false),
        }
    }

    fn gate(&self) -> Result<&Arc<dyn CallGate>> {
        self.gate.as_ref().ok_or(ApiError::Uninitialized)
    }

    /// `Ok(None)` means the host has no handler for `call`.
    fn dispatch(&self, call: Call, args: Vec<Value>) -> Result<Option<Value>> {
        let gate = self.gate()?;
        debug_assert_eq!(args.len(), call.arity(), "wrong argument count for {call}");

        trace!("Invoking {} with {} args", call, args.len());
        match gate.invoke(call.identifier(), args) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_ready() => {
                debug!("{} not ready: {}", call, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn decode<T: DeserializeOwned>(call: Call, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| ApiError::UnexpectedReturn { call, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;

    struct Fixed(Value);

    impl CallGate for Fixed {
        fn invoke(
            &self,
            _identifier: &str,
            _args: Vec<Value>,
        ) -> std::result::Result<Value, GateError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_detached_is_usage_error() {
        let api = NotificationMasterApi::detached();
        assert!(!api.is_attached());
        assert!(matches!(api.is_ready(), Err(ApiError::Uninitialized)));
        assert!(matches!(api.stop_sound(), Err(ApiError::Uninitialized)));
    }

    #[test]
    fn test_attach_after_construction() {
        let mut api = NotificationMasterApi::default();
        api.attach(Arc::new(Fixed(json!(true))));
        assert!(api.is_attached());
        assert!(api.flash_taskbar_icon().unwrap());
    }

    #[test]
    fn test_probe_ignores_return_value() {
        let api = NotificationMasterApi::new(Arc::new(Fixed(Value::Null)));
        assert!(api.is_ready().unwrap());
    }

    #[test]
    fn test_non_bool_return_is_unexpected() {
        let api = NotificationMasterApi::new(Arc::new(Fixed(json!("done"))));
        let err = api.stop_sound().unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnexpectedReturn {
                call: Call::StopSound,
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_volume_never_reaches_gate() {
        let api = NotificationMasterApi::new(Arc::new(Fixed(json!(true))));
        assert!(matches!(
            api.play_sound("/tmp/a.wav", f32::NAN, false, true),
            Err(ApiError::InvalidVolume(_))
        ));
        assert!(matches!(
            api.play(&SoundRequest::new("/tmp/a.wav").volume(f32::INFINITY)),
            Err(ApiError::InvalidVolume(_))
        ));
    }

    #[test]
    fn test_detached_check_precedes_volume_check() {
        let api = NotificationMasterApi::detached();
        assert!(matches!(
            api.play_sound("/tmp/a.wav", f32::NAN, false, true),
            Err(ApiError::Uninitialized)
        ));
    }

    #[test]
    fn test_debug_hides_gate() {
        let api = NotificationMasterApi::new(Arc::new(Fixed(json!(true))));
        assert_eq!(
            format!("{api:?}"),
            "NotificationMasterApi { attached: true }"
        );
    }
}
