//! Identifiers the `NotificationMaster` host registers its calls under.
//!
//! These strings are the only wire contract between this crate and the host:
//! they must match the host's registration table byte for byte.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DISPLAY_TOAST_NOTIFICATION: &str = "NotificationMasterAPI.DisplayToastNotification";
pub const FLASH_TASKBAR_ICON: &str = "NotificationMasterAPI.FlashTaskbarIcon";
pub const PLAY_SOUND: &str = "NotificationMasterAPI.PlaySound";
pub const BRING_GAME_FOREGROUND: &str = "NotificationMasterAPI.BringGameForeground";
pub const STOP_SOUND: &str = "NotificationMasterAPI.StopSound";
pub const ACTIVE: &str = "NotificationMasterAPI.Active";

/// A call the host plugin exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    /// Show a tray/toast notification
    DisplayToast,
    /// Flash the taskbar icon of the host window
    FlashTaskbar,
    /// Start playing a local sound file
    PlaySound,
    /// Ask the windowing system to focus the host window
    BringForeground,
    /// Stop the sound started by `PlaySound`
    StopSound,
    /// Readiness probe
    Probe,
}

impl Call {
    pub const ALL: [Call; 6] = [
        Call::DisplayToast,
        Call::FlashTaskbar,
        Call::PlaySound,
        Call::BringForeground,
        Call::StopSound,
        Call::Probe,
    ];

    /// Identifier the host registers this call under.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Call::DisplayToast => DISPLAY_TOAST_NOTIFICATION,
            Call::FlashTaskbar => FLASH_TASKBAR_ICON,
            Call::PlaySound => PLAY_SOUND,
            Call::BringForeground => BRING_GAME_FOREGROUND,
            Call::StopSound => STOP_SOUND,
            Call::Probe => ACTIVE,
        }
    }

    /// Number of positional arguments the host handler takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Call::DisplayToast => 2,
            Call::PlaySound => 4,
            Call::FlashTaskbar | Call::BringForeground | Call::StopSound | Call::Probe => 0,
        }
    }

    /// Reverse lookup from a host identifier.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|call| call.identifier() == identifier)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Identifier did not name any known call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown call identifier: {0}")]
pub struct UnknownCall(pub String);

impl FromStr for Call {
    type Err = UnknownCall;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| UnknownCall(s.to_string()))
    }
}

impl Serialize for Call {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.identifier())
    }
}

impl<'de> Deserialize<'de> for Call {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let identifier = String::deserialize(deserializer)?;
        identifier.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_identifiers_match_host_table() {
        assert_eq!(
            Call::DisplayToast.identifier(),
            "NotificationMasterAPI.DisplayToastNotification"
        );
        assert_eq!(
            Call::FlashTaskbar.identifier(),
            "NotificationMasterAPI.FlashTaskbarIcon"
        );
        assert_eq!(Call::PlaySound.identifier(), "NotificationMasterAPI.PlaySound");
        assert_eq!(
            Call::BringForeground.identifier(),
            "NotificationMasterAPI.BringGameForeground"
        );
        assert_eq!(Call::StopSound.identifier(), "NotificationMasterAPI.StopSound");
        assert_eq!(Call::Probe.identifier(), "NotificationMasterAPI.Active");
    }

    #[test]
    fn test_identifiers_are_unique() {
        let unique: HashSet<_> = Call::ALL.iter().map(|c| c.identifier()).collect();
        assert_eq!(unique.len(), Call::ALL.len());
    }

    #[test]
    fn test_identifier_is_stable_across_calls() {
        let first = Call::DisplayToast.identifier();
        let second = Call::DisplayToast.identifier();
        assert_eq!(first, second);
        assert_eq!(first, DISPLAY_TOAST_NOTIFICATION);
    }

    #[test]
    fn test_arity() {
        assert_eq!(Call::DisplayToast.arity(), 2);
        assert_eq!(Call::PlaySound.arity(), 4);
        assert_eq!(Call::Probe.arity(), 0);
        assert_eq!(Call::StopSound.arity(), 0);
    }

    #[test]
    fn test_reverse_lookup() {
        for call in Call::ALL {
            assert_eq!(Call::from_identifier(call.identifier()), Some(call));
            assert_eq!(call.to_string().parse::<Call>(), Ok(call));
        }
    }

    #[test]
    fn test_unknown_identifier() {
        let err = "NotificationMasterAPI.Explode".parse::<Call>().unwrap_err();
        assert!(err.to_string().contains("Explode"));
        assert!(Call::from_identifier("notificationmasterapi.active").is_none());
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&Call::StopSound).unwrap();
        assert_eq!(json, "\"NotificationMasterAPI.StopSound\"");

        let call: Call = serde_json::from_str("\"NotificationMasterAPI.Active\"").unwrap();
        assert_eq!(call, Call::Probe);

        assert!(serde_json::from_str::<Call>("\"Active\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_only_table_entries_resolve(s in "\\PC*") {
            let known = Call::ALL.iter().any(|c| c.identifier() == s);
            prop_assert_eq!(Call::from_identifier(&s).is_some(), known);
        }
    }
}
