//! A storage node: holds a shard of the keyspace, serves SET/GET/DELETE/
//! HEALTH, and replicates writes to its configured replicas.
//!
//! Grounded on `original_source/kv_node.py`'s `KVStoreNode`. The Python's
//! `_send_to_node` was a `pass`-only stub (spec.md §9 Open Question: "the
//! functional variant is authoritative") — here it is a real, best-effort
//! async TCP call, matching `coordinator::routing::send_to_node`'s shape.

use std::sync::Mutex as StdMutex;
use std::time::Duration;

use protocol::{read_frame, write_frame, Operation, Request, ProtocolError, NODE_FRAME_LIMIT};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::record::Record;
use crate::store::Store;

const REPLICA_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a replica of this node lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaAddr {
    pub node_id: String,
    pub host: String,
    pub port: u16,
}

impl ReplicaAddr {
    pub fn new(node_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            node_id: node_id.into(),
            host: host.into(),
            port,
        }
    }
}

/// A single storage node.
///
/// `replica_of` marks this node as a replica of another (static
/// designation, spec.md §4.3): a replica never fans writes out further,
/// regardless of the `sync` flag on the incoming request.
pub struct StorageNode {
    node_id: String,
    replica_of: Option<String>,
    replicas: StdMutex<Vec<ReplicaAddr>>,
    store: Store,
}

impl StorageNode {
    /// Builds a primary node.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            replica_of: None,
            replicas: StdMutex::new(Vec::new()),
            store: Store::new(),
        }
    }

    /// Builds a node that is itself a replica of `primary_id`.
    pub fn new_replica(node_id: impl Into<String>, primary_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            replica_of: Some(primary_id.into()),
            replicas: StdMutex::new(Vec::new()),
            store: Store::new(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Adds a replica this node (if primary) fans writes out to.
    pub fn add_replica(&self, replica: ReplicaAddr) {
        self.replicas.lock().unwrap().push(replica);
    }

    fn replica_targets(&self) -> Vec<ReplicaAddr> {
        self.replicas.lock().unwrap().clone()
    }

    /// `SET key = value`. `sync` is true when this call is itself a
    /// replication fan-out from a primary; in that case this node must not
    /// fan out again. Always returns `true` (matches the original, which
    /// never fails a `SET`).
    pub async fn set(&self, key: &str, value: Value) -> bool {
        self.set_inner(key, value, false).await
    }

    /// `SET` received as a replication fan-out call (`sync=true` on the
    /// wire): applies locally, never re-replicates.
    pub async fn replicate_set(&self, key: &str, value: Value) -> bool {
        self.set_inner(key, value, true).await
    }

    async fn set_inner(&self, key: &str, value: Value, sync: bool) -> bool {
        self.store
            .with_slot(key, |mut guard| async move {
                let previous = guard.clone();
                *guard = Some(Record::next(value.clone(), previous.as_ref()));
                if !sync && self.replica_of.is_none() {
                    self.sync_to_replicas(Operation::Set, key, Some(value)).await;
                }
                true
            })
            .await
    }

    /// `GET key`. Returns the stored value, if present.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key).await.map(|record| record.value)
    }

    /// `DELETE key`. Returns whether the key was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.delete_inner(key, false).await
    }

    /// `DELETE` received as a replication fan-out call.
    pub async fn replicate_delete(&self, key: &str) -> bool {
        self.delete_inner(key, true).await
    }

    async fn delete_inner(&self, key: &str, sync: bool) -> bool {
        self.store
            .with_slot(key, |mut guard| async move {
                let existed = guard.is_some();
                *guard = None;
                if existed && !sync && self.replica_of.is_none() {
                    self.sync_to_replicas(Operation::Delete, key, None).await;
                }
                existed
            })
            .await
    }

    /// Number of live (non-deleted) keys, for `HEALTH`.
    pub async fn data_size(&self) -> usize {
        self.store.live_count().await
    }

    /// Fans `operation` out to every configured replica with `sync=true`.
    /// Failures are logged and swallowed (spec.md §4.3: "best-effort").
    async fn sync_to_replicas(&self, operation: Operation, key: &str, value: Option<Value>) {
        let request = Request::data(operation, key, value).as_sync();
        for replica in self.replica_targets() {
            if let Err(err) = send_replicated(&replica, &request).await {
                tracing::warn!(
                    replica = %replica.node_id,
                    error = %err,
                    "failed to sync to replica"
                );
            }
        }
    }
}

async fn send_replicated(replica: &ReplicaAddr, request: &Request) -> Result<(), ProtocolError> {
    timeout(REPLICA_TIMEOUT, send_replicated_inner(replica, request))
        .await
        .map_err(|_| ProtocolError::ConnectionClosed)?
}

async fn send_replicated_inner(replica: &ReplicaAddr, request: &Request) -> Result<(), ProtocolError> {
    let mut stream = TcpStream::connect((replica.host.as_str(), replica.port)).await?;
    let payload = serde_json::to_vec(request)?;
    write_frame(&mut stream, &payload).await?;
    // Response is read (to drain the socket cleanly) but discarded, per
    // spec.md §4.3: "optionally read a response (discarded)".
    let _ = read_frame(&mut stream, NODE_FRAME_LIMIT).await;
    Ok(())
}
