//! Where to find the host socket and how long to wait for it.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

const SOCKET_NAME: &str = "notimaster.sock";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

fn runtime_dir() -> PathBuf {
    std::env::var("XDG_RUNTIME_DIR").map_or_else(|_| std::env::temp_dir(), PathBuf::from)
}

/// Default host socket path.
///
/// On Linux, prefers `$XDG_RUNTIME_DIR` for proper runtime file handling.
/// Falls back to the system temp directory for cross-platform compatibility.
#[must_use]
pub fn socket_path() -> PathBuf {
    runtime_dir().join(SOCKET_NAME)
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Settings for [`SocketGate`](crate::bridge::SocketGate)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    #[serde(default = "socket_path")]
    pub socket_path: PathBuf,

    /// Per-call limit in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            socket_path: socket_path(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl GateConfig {
    #[must_use]
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
