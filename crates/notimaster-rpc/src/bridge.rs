//! Blocking [`CallGate`] backed by the host socket.
//!
//! The facade is synchronous, so the gate owns a small current-thread tokio
//! runtime and blocks on it for each call. The connection is opened lazily
//! and reopened after the host goes away; a host that is not running at all
//! reads as "not ready".

use std::sync::{Mutex, PoisonError};

use notimaster_api::{CallGate, GateError};
use serde_json::Value;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::{debug, trace};

use crate::client::RpcClient;
use crate::config::GateConfig;
use crate::error::{BridgeError, Result};

/// Dispatch capability that forwards calls to a host over a Unix socket.
///
/// Calls block the current thread. From inside an async runtime they fail
/// with [`BridgeError::InsideRuntime`] instead of blocking a worker.
pub struct SocketGate {
    client: Mutex<Option<RpcClient>>,
    // Always `Some` until drop
    runtime: Option<Runtime>,
    config: GateConfig,
}

impl std::fmt::Debug for SocketGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SocketGate {
    /// Create a gate. No connection is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Io` if the runtime cannot be created.
    pub fn new(config: GateConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            client: Mutex::new(None),
            runtime: Some(runtime),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Invoke a host call, connecting first if needed.
    ///
    /// # Errors
    ///
    /// Returns the bridge error unchanged; see [`BridgeError::is_not_ready`]
    /// for which ones mean the host is absent.
    pub fn call(&self, identifier: &str, args: Vec<Value>) -> Result<Value> {
        if Handle::try_current().is_ok() {
            return Err(BridgeError::InsideRuntime);
        }
        let Some(runtime) = &self.runtime else {
            return Err(BridgeError::ConnectionClosed);
        };

        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        let timeout = self.config.timeout();

        runtime.block_on(async {
            if let Some(client) = slot.take() {
                // The reader only runs while we block, so let it notice a
                // hangup that happened between calls.
                tokio::task::yield_now().await;

                if client.is_closed() {
                    debug!("Host closed the idle connection, reconnecting");
                } else {
                    trace!("Calling {} on host", identifier);
                    match client.call(identifier, args.clone(), timeout).await {
                        Err(e) if e.is_retryable() => {
                            debug!("Stale host connection ({}), reconnecting", e);
                        }
                        result => return settle(&mut slot, client, result),
                    }
                }
            }

            let client = RpcClient::connect(&self.config.socket_path).await?;
            trace!("Calling {} on host", identifier);
            let result = client.call(identifier, args, timeout).await;
            settle(&mut slot, client, result)
        })
    }
}

impl Drop for SocketGate {
    fn drop(&mut self) {
        drop(
            self.client
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );

        // Unlike a plain drop, this never blocks, so it is safe on a tokio
        // worker thread too.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Keep `client` for the next call unless `result` shows the socket is dead.
fn settle(
    slot: &mut Option<RpcClient>,
    client: RpcClient,
    result: Result<Value>,
) -> Result<Value> {
    if keeps_connection(&result) {
        *slot = Some(client);
    }
    result
}

/// Handler-level outcomes leave the socket usable; transport failures do not.
fn keeps_connection(result: &Result<Value>) -> bool {
    matches!(result, Ok(_) | Err(BridgeError::Rpc { .. } | BridgeError::Timeout))
}

impl CallGate for SocketGate {
    fn invoke(
        &self,
        identifier: &str,
        args: Vec<Value>,
    ) -> std::result::Result<Value, GateError> {
        self.call(identifier, args)
            .map_err(|e| e.into_gate_error(identifier))
    }
}
