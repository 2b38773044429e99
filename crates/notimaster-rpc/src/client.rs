//! Async JSON-RPC client for the host socket.
//!
//! A background task reads frames from the socket and hands each response to
//! the request waiting on its id. The host has nothing to push to us, so any
//! other message is logged and dropped.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::UnixStream;
use tokio::sync::{Mutex, oneshot};
use tokio_util::codec::Framed;
use tracing::{debug, error, warn};

use crate::error::{BridgeError, Result};
use crate::protocol::{Message, Request, RequestId, Response};
use crate::transport::FrameCodec;

/// Pending request waiting for a response
type PendingRequest = oneshot::Sender<Result<Response>>;
type PendingMap = Arc<Mutex<HashMap<RequestId, PendingRequest>>>;

/// Connection to a host socket
pub struct RpcClient {
    sender: Mutex<SplitSink<Framed<UnixStream, FrameCodec>, Message>>,
    pending: PendingMap,
    next_id: AtomicU64,
    closed: Arc<AtomicBool>,
}

impl RpcClient {
    /// Connect to the host listening at `path`.
    ///
    /// Must run inside a tokio runtime; the reader task is spawned on it.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Io` if the socket connection fails.
    pub async fn connect(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path).await?;
        debug!("Connected to host at {}", path.display());

        let (sink, mut stream) = Framed::new(stream, FrameCodec::new()).split();

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let reader_pending = pending.clone();
        let reader_closed = closed.clone();
        tokio::spawn(async move {
            while let Some(result) = stream.next().await {
                match result {
                    Ok(Message::Response(resp)) => {
                        let waiter = reader_pending.lock().await.remove(&resp.id);
                        match waiter {
                            Some(tx) => {
                                let _ = tx.send(Ok(resp));
                            }
                            None => warn!("Response for unknown request {}", resp.id),
                        }
                    }
                    Ok(other) => {
                        warn!("Ignoring unsolicited message from host: {:?}", other);
                    }
                    Err(e) => {
                        error!("Failed to read from host: {}", e);
                        break;
                    }
                }
            }

            reader_closed.store(true, Ordering::SeqCst);
            for (_, tx) in reader_pending.lock().await.drain() {
                let _ = tx.send(Err(BridgeError::ConnectionClosed));
            }
        });

        Ok(Self {
            sender: Mutex::new(sink),
            pending,
            next_id: AtomicU64::new(1),
            closed,
        })
    }

    /// Whether the host side of the connection has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Invoke a host call and wait up to `timeout` for its value.
    ///
    /// A response carrying neither `result` nor `error` yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Rpc` when the host answers with an error, and
    /// transport errors when the request cannot be delivered or answered.
    pub async fn call(
        &self,
        identifier: &str,
        args: Vec<Value>,
        timeout: Duration,
    ) -> Result<Value> {
        if self.is_closed() {
            return Err(BridgeError::ConnectionClosed);
        }

        let id = RequestId::Number(self.next_id.fetch_add(1, Ordering::SeqCst));
        let request = Request::call(identifier, args, id.clone());

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id.clone(), tx);

        // The reader marks the connection closed before draining waiters, so
        // a waiter inserted after the drain is caught here.
        if self.is_closed() {
            self.pending.lock().await.remove(&id);
            return Err(BridgeError::ConnectionClosed);
        }

        let sent = self.sender.lock().await.send(Message::Request(request)).await;
        if let Err(e) = sent {
            self.pending.lock().await.remove(&id);
            return Err(BridgeError::Unsent(e));
        }

        let response = match tokio::time::timeout(timeout, rx).await {
            Ok(answer) => answer.map_err(|_| BridgeError::ConnectionClosed)??,
            Err(_) => {
                self.pending.lock().await.remove(&id);
                return Err(BridgeError::Timeout);
            }
        };

        if let Some(error) = response.error {
            return Err(error.into());
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_to_missing_socket() {
        let dir = tempfile::tempdir().unwrap();
        let result = RpcClient::connect(&dir.path().join("absent.sock")).await;

        let Err(err) = result else {
            panic!("connect should fail");
        };
        assert!(matches!(err, BridgeError::Io(_)));
        assert!(err.is_not_ready());
    }
}
