//! Sound playback request.

use serde_json::{Value, json};

use crate::error::{ApiError, Result};

pub const DEFAULT_VOLUME: f32 = 1.0;

/// Arguments for the host's `PlaySound` call.
///
/// `path` is a file on local disk; the host does not fetch URLs. Volume is
/// conventionally in `0.0..=1.0` and is passed through unclamped, but it must
/// be finite: JSON has no NaN or infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub path: String,
    pub volume: f32,
    pub repeat: bool,
    pub stop_on_focus: bool,
}

impl SoundRequest {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            volume: DEFAULT_VOLUME,
            repeat: false,
            stop_on_focus: true,
        }
    }

    #[must_use]
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    #[must_use]
    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Whether the host stops playback once its window gains focus
    #[must_use]
    pub fn stop_on_focus(mut self, stop_on_focus: bool) -> Self {
        self.stop_on_focus = stop_on_focus;
        self
    }

    pub(crate) fn to_args(&self) -> Result<Vec<Value>> {
        if !self.volume.is_finite() {
            return Err(ApiError::InvalidVolume(self.volume));
        }

        Ok(vec![
            json!(self.path),
            json!(self.volume),
            json!(self.repeat),
            json!(self.stop_on_focus),
        ])
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)] // Exact float comparisons are intentional in tests

    use super::*;

    #[test]
    fn test_defaults() {
        let req = SoundRequest::new("/tmp/ping.wav");
        assert_eq!(req.path, "/tmp/ping.wav");
        assert_eq!(req.volume, 1.0);
        assert!(!req.repeat);
        assert!(req.stop_on_focus);
    }

    #[test]
    fn test_builder_overrides() {
        let req = SoundRequest::new("alarm.mp3")
            .volume(0.25)
            .repeat(true)
            .stop_on_focus(false);
        assert_eq!(req.volume, 0.25);
        assert!(req.repeat);
        assert!(!req.stop_on_focus);
    }

    #[test]
    fn test_volume_is_not_clamped() {
        let req = SoundRequest::new("loud.wav").volume(3.5);
        assert_eq!(req.volume, 3.5);
    }

    #[test]
    fn test_args_order() {
        let args = SoundRequest::new(r"C:\a.wav").volume(0.5).to_args().unwrap();
        assert_eq!(args.len(), 4);
        assert_eq!(args[0], json!(r"C:\a.wav"));
        assert_eq!(args[1].as_f64(), Some(0.5));
        assert_eq!(args[2], json!(false));
        assert_eq!(args[3], json!(true));
    }

    #[test]
    fn test_non_finite_volume_rejected() {
        for volume in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = SoundRequest::new("a.wav").volume(volume).to_args().unwrap_err();
            assert!(matches!(err, ApiError::InvalidVolume(v) if v.to_bits() == volume.to_bits()));
        }
    }
}
