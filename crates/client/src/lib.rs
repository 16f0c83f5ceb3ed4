//! A one-shot TCP client for talking to the coordinator.
//!
//! Grounded line for line on `original_source/client.py`'s `KVClient`:
//! `set`/`get`/`delete` return bare booleans/`Option<Value>`, `health`
//! returns the raw response, and no transport error ever propagates to the
//! caller — every failure collapses to the "nothing happened" outcome,
//! matching the original's `except Exception` catch-all.

use std::time::Duration;

use protocol::{read_frame, write_frame, Operation, ProtocolError, Request, Response, CLIENT_REQUEST_LIMIT};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::timeout;

const COORDINATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// A client bound to one coordinator address.
#[derive(Debug, Clone)]
pub struct KvClient {
    coordinator_host: String,
    coordinator_port: u16,
}

impl KvClient {
    pub fn new(coordinator_host: impl Into<String>, coordinator_port: u16) -> Self {
        Self {
            coordinator_host: coordinator_host.into(),
            coordinator_port,
        }
    }

    /// Sets `key` to `value`. Returns whether the coordinator reported
    /// success; any transport failure is reported as `false`, never raised.
    pub async fn set(&self, key: &str, value: Value) -> bool {
        self.send(Request::data(Operation::Set, key, Some(value)))
            .await
            .map(|r| r.is_success())
            .unwrap_or(false)
    }

    /// Gets `key`. Returns `None` both for a missing key and for a
    /// transport failure — exactly as the original's "value if success else
    /// None" does not distinguish the two.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let response = self.send(Request::data(Operation::Get, key, None)).await.ok()?;
        if response.is_success() {
            response.value
        } else {
            None
        }
    }

    /// Deletes `key`. Returns whether the coordinator reported success.
    pub async fn delete(&self, key: &str) -> bool {
        self.send(Request::data(Operation::Delete, key, None))
            .await
            .map(|r| r.is_success())
            .unwrap_or(false)
    }

    /// Returns the raw cluster health response, or a synthesized failure
    /// response if the coordinator couldn't be reached.
    pub async fn health(&self) -> Response {
        self.send(Request::health())
            .await
            .unwrap_or_else(|err| Response::error(err.to_string()))
    }

    async fn send(&self, request: Request) -> Result<Response, ProtocolError> {
        timeout(COORDINATOR_TIMEOUT, self.send_inner(&request))
            .await
            .map_err(|_| ProtocolError::ConnectionClosed)?
    }

    async fn send_inner(&self, request: &Request) -> Result<Response, ProtocolError> {
        let mut stream = TcpStream::connect((self.coordinator_host.as_str(), self.coordinator_port)).await?;
        let payload = serde_json::to_vec(request)?;
        write_frame(&mut stream, &payload).await?;
        // The original client reads its response with the same 1 KiB
        // `recv(1024)` buffer it used to send the request.
        let bytes = read_frame(&mut stream, CLIENT_REQUEST_LIMIT).await?;
        let response: Response = serde_json::from_slice(&bytes)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_coordinator_fails_closed_not_open() {
        let client = KvClient::new("127.0.0.1", 1);
        assert!(!client.set("k", Value::from(1)).await);
        assert_eq!(client.get("k").await, None);
        assert!(!client.delete("k").await);
    }
}
