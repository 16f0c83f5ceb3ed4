//! Wire schema: the JSON objects that flow between client, coordinator, and
//! storage nodes. Grounded directly on the request/response dicts built and
//! consumed by `original_source/{client,coordinator,kv_node}.py` — every
//! field here is one a peer running that original code would recognize.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The operation a [`Request`] asks a peer to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Set,
    Get,
    Delete,
    Health,
    Register,
}

/// A single request frame.
///
/// Not every field is meaningful for every operation: `key`/`value` are for
/// data ops, `node_id`/`host`/`port` are for `REGISTER`, `sync` marks a
/// replication-fanout call so the receiving node skips its own fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sync: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Request {
    /// Builds a data-op request (`SET`/`GET`/`DELETE`).
    pub fn data(operation: Operation, key: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            operation,
            key: Some(key.into()),
            value,
            sync: false,
            node_id: None,
            host: None,
            port: None,
        }
    }

    /// Marks this request as a replication fan-out call, so the receiver
    /// does not itself re-replicate.
    pub fn as_sync(mut self) -> Self {
        self.sync = true;
        self
    }

    /// Builds a `HEALTH` request.
    pub fn health() -> Self {
        Self {
            operation: Operation::Health,
            key: None,
            value: None,
            sync: false,
            node_id: None,
            host: None,
            port: None,
        }
    }

    /// Builds a `REGISTER` request.
    pub fn register(node_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            operation: Operation::Register,
            key: None,
            value: None,
            sync: false,
            node_id: Some(node_id.into()),
            host: Some(host.into()),
            port: Some(port),
        }
    }
}

/// A single response frame.
///
/// Mirrors the original's habit of returning a loosely-shaped dict whose
/// populated fields depend on which operation produced it — rather than
/// model every response shape as its own type, one struct with optional
/// fields covers them all, matching the wire bytes a Python peer would send
/// or expect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_size: Option<usize>,
}

impl Response {
    /// `{success: true, operation: ...}` — the `SET`/`DELETE` shape.
    pub fn ok(operation: Operation) -> Self {
        Self {
            success: Some(true),
            operation: Some(operation),
            ..Default::default()
        }
    }

    /// `{success: false, operation: ...}` — `DELETE` of a missing key, or a
    /// replica rejecting a replayed `SET`/`DELETE`. No error string: this is
    /// a semantic failure, not a transport or protocol one.
    pub fn not_ok(operation: Operation) -> Self {
        Self {
            success: Some(false),
            operation: Some(operation),
            ..Default::default()
        }
    }

    /// `{success, operation}` with an explicit outcome — the common case for
    /// `SET`/`DELETE`, whose `success` reflects whether the op actually
    /// changed anything (e.g. `DELETE` of a missing key is `false`).
    pub fn of(operation: Operation, success: bool) -> Self {
        Self {
            success: Some(success),
            operation: Some(operation),
            ..Default::default()
        }
    }

    /// `{success: bool, value}` — the `GET` shape. `success` is true iff the
    /// key was present.
    pub fn get_result(value: Option<Value>) -> Self {
        Self {
            success: Some(value.is_some()),
            value,
            ..Default::default()
        }
    }

    /// `{success: false, error: "..."}` — protocol error or routing failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// `{success: true, message: "..."}` — successful `REGISTER`.
    pub fn registered(node_id: &str) -> Self {
        Self {
            success: Some(true),
            message: Some(format!("Node {node_id} registered")),
            ..Default::default()
        }
    }

    /// A storage node's `HEALTH` response.
    pub fn node_health(node_id: impl Into<String>, data_size: usize) -> Self {
        Self {
            status: Some("healthy".to_string()),
            node_id: Some(node_id.into()),
            data_size: Some(data_size),
            ..Default::default()
        }
    }

    /// The coordinator's `HEALTH` response.
    pub fn cluster_health(node_count: usize, nodes: Vec<String>) -> Self {
        Self {
            status: Some("healthy".to_string()),
            node_count: Some(node_count),
            nodes: Some(nodes),
            ..Default::default()
        }
    }

    /// True if this response represents a successful outcome (defaults to
    /// `false` when `success` is absent, e.g. a bare `HEALTH` response).
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_data_round_trips_through_json() {
        let req = Request::data(Operation::Set, "k", Some(Value::from(42)));
        let bytes = serde_json::to_vec(&req).unwrap();
        let back: Request = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.operation, Operation::Set);
        assert_eq!(back.key.as_deref(), Some("k"));
        assert_eq!(back.value, Some(Value::from(42)));
        assert!(!back.sync);
    }

    #[test]
    fn sync_request_serializes_true() {
        let req = Request::data(Operation::Delete, "k", None).as_sync();
        let v: Value = serde_json::to_value(&req).unwrap();
        assert_eq!(v["sync"], Value::from(true));
    }

    #[test]
    fn unset_optional_fields_are_omitted() {
        let req = Request::health();
        let v: Value = serde_json::to_value(&req).unwrap();
        assert!(v.get("key").is_none());
        assert!(v.get("value").is_none());
        assert!(v.get("sync").is_none());
    }

    #[test]
    fn get_result_success_reflects_presence() {
        assert!(Response::get_result(Some(Value::from("v"))).is_success());
        assert!(!Response::get_result(None).is_success());
    }
}
