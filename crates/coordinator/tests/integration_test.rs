//! End-to-end coverage of the coordinator: a real coordinator listener
//! routing to real storage node listeners, exercising spec.md §8's
//! end-to-end scenarios.

use std::sync::Arc;

use coordinator::{ClusterState, NodeDescriptor};
use kvnode::StorageNode;
use protocol::{read_frame, write_frame, Operation, Request, Response, CLIENT_REQUEST_LIMIT};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};

async fn spawn_kv_node(node_id: &str) -> std::net::SocketAddr {
    let node = Arc::new(StorageNode::new(node_id));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(kvnode::serve(listener, node));
    addr
}

/// Same as `spawn_kv_node`, but hands back the node (so a test can wire it
/// as a replica target) and the accept task's handle (so a test can kill it
/// to simulate the node going down).
async fn spawn_kv_node_handle(
    node_id: &str,
) -> (std::net::SocketAddr, Arc<StorageNode>, tokio::task::JoinHandle<()>) {
    let node = Arc::new(StorageNode::new(node_id));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(kvnode::serve(listener, Arc::clone(&node)));
    (addr, node, handle)
}

async fn spawn_coordinator() -> (std::net::SocketAddr, Arc<ClusterState>) {
    let state = Arc::new(ClusterState::new());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(coordinator::serve(listener, Arc::clone(&state)));
    (addr, state)
}

async fn roundtrip(addr: std::net::SocketAddr, request: &Request) -> Response {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let payload = serde_json::to_vec(request).unwrap();
    write_frame(&mut stream, &payload).await.unwrap();
    let bytes = read_frame(&mut stream, CLIENT_REQUEST_LIMIT).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn build_three_node_cluster() -> (std::net::SocketAddr, Arc<ClusterState>) {
    let (coordinator_addr, state) = spawn_coordinator().await;
    for i in 0..3 {
        let node_id = format!("node_{i}");
        let node_addr = spawn_kv_node(&node_id).await;
        state.register_node_default(NodeDescriptor::new(node_id, "127.0.0.1", node_addr.port()));
    }
    (coordinator_addr, state)
}

#[tokio::test]
async fn basic_put_get() {
    let (addr, _state) = build_three_node_cluster().await;

    let set = Request::data(Operation::Set, "user:1", Some(json!({"name": "Alice", "age": 30})));
    let response = roundtrip(addr, &set).await;
    assert_eq!(response.success, Some(true));

    let get = Request::data(Operation::Get, "user:1", None);
    let response = roundtrip(addr, &get).await;
    assert_eq!(response.value, Some(json!({"name": "Alice", "age": 30})));

    let missing = Request::data(Operation::Get, "missing", None);
    let response = roundtrip(addr, &missing).await;
    assert_eq!(response.value, None);
}

#[tokio::test]
async fn delete_roundtrip() {
    let (addr, _state) = build_three_node_cluster().await;

    roundtrip(addr, &Request::data(Operation::Set, "k", Some(json!("v")))).await;
    let first = roundtrip(addr, &Request::data(Operation::Delete, "k", None)).await;
    assert_eq!(first.success, Some(true));

    let get = roundtrip(addr, &Request::data(Operation::Get, "k", None)).await;
    assert_eq!(get.value, None);

    let second = roundtrip(addr, &Request::data(Operation::Delete, "k", None)).await;
    assert_eq!(second.success, Some(false));
}

#[tokio::test]
async fn routing_is_stable_while_the_ring_is_unchanged() {
    let (addr, _state) = build_three_node_cluster().await;

    roundtrip(addr, &Request::data(Operation::Set, "k", Some(json!(1)))).await;
    let first = roundtrip(addr, &Request::data(Operation::Get, "k", None)).await;
    for _ in 0..5 {
        let again = roundtrip(addr, &Request::data(Operation::Get, "k", None)).await;
        assert_eq!(again.value, first.value);
    }
}

#[tokio::test]
async fn health_reports_registered_node_count_and_ids() {
    let (addr, _state) = build_three_node_cluster().await;

    let health = roundtrip(addr, &Request::health()).await;
    assert_eq!(health.node_count, Some(3));
    let nodes = health.nodes.unwrap();
    assert_eq!(nodes.len(), 3);
    for i in 0..3 {
        assert!(nodes.contains(&format!("node_{i}")));
    }
}

#[tokio::test]
async fn empty_cluster_reports_no_available_nodes() {
    let (addr, _state) = spawn_coordinator().await;
    let response = roundtrip(addr, &Request::data(Operation::Get, "k", None)).await;
    assert_eq!(response.error.as_deref(), Some("No available nodes"));
}

#[tokio::test]
async fn register_over_the_wire() {
    let (addr, state) = spawn_coordinator().await;
    let node_addr = spawn_kv_node("node_x").await;

    let register = Request::register("node_x", "127.0.0.1", node_addr.port());
    let response = roundtrip(addr, &register).await;
    assert_eq!(response.success, Some(true));
    assert_eq!(state.node_count(), 1);
}

/// With exactly two nodes, the successor list for any key contains both,
/// in a fixed order — set up the second to replicate the first, then drop
/// the first's accept task to simulate it going down, and confirm the
/// coordinator's GET fails over to the (already-replicated) secondary.
#[tokio::test]
async fn failover_returns_the_replicated_value_from_the_secondary() {
    let (coordinator_addr, state) = spawn_coordinator().await;

    let (addr_a, node_a, handle_a) = spawn_kv_node_handle("node_a").await;
    let (addr_b, node_b, _handle_b) = spawn_kv_node_handle("node_b").await;
    node_a.add_replica(kvnode::ReplicaAddr::new("node_b", "127.0.0.1", addr_b.port()));

    state.register_node_default(NodeDescriptor::new("node_a", "127.0.0.1", addr_a.port()));
    state.register_node_default(NodeDescriptor::new("node_b", "127.0.0.1", addr_b.port()));

    let key = "k";
    let successors = state.successors_for_key(key, 2);
    assert_eq!(successors.len(), 2);

    let set = Request::data(Operation::Set, key, Some(json!("v")));
    let response = roundtrip(coordinator_addr, &set).await;
    assert_eq!(response.success, Some(true));

    // Let the best-effort replication call land.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(node_b.get(key).await, Some(json!("v")));

    // Simulate node_a going down.
    handle_a.abort();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let get = roundtrip(coordinator_addr, &Request::data(Operation::Get, key, None)).await;
    assert_eq!(get.value, Some(json!("v")));
}
