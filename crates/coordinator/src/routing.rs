//! Request routing: find the successor nodes for a key, try each in turn.
//!
//! Grounded on `original_source/coordinator.py`'s `route_request`/
//! `_send_to_node`: compute `get_nodes(key, 2)`, dial each candidate with a
//! per-attempt timeout, return the first node's response verbatim, and fall
//! back to the next successor on any failure.

use std::time::Duration;

use protocol::{read_frame, write_frame, ProtocolError, Request, Response, NODE_FRAME_LIMIT};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::state::ClusterState;

const NODE_TIMEOUT: Duration = Duration::from_secs(5);

/// Number of successors to try for a data op (primary + one fallback).
pub const ROUTING_FANOUT: usize = 2;

/// Routes a data-op request to the successor list for `key`, returning the
/// first node's response verbatim, or the spec's fixed error strings on
/// total failure.
pub async fn route_request(state: &ClusterState, request: &Request, key: &str) -> Response {
    let successors = state.successors_for_key(key, ROUTING_FANOUT);
    if successors.is_empty() {
        return Response::error("No available nodes");
    }

    let mut last_error: Option<String> = None;
    for node_id in successors {
        let Some(descriptor) = state.descriptor(&node_id) else {
            continue;
        };

        match send_to_node(&descriptor.host, descriptor.port, request).await {
            Ok(response) => return response,
            Err(err) => {
                tracing::warn!(node_id = %descriptor.node_id, error = %err, "node failed, trying next");
                last_error = Some(err.to_string());
            }
        }
    }

    Response::error(format!(
        "All nodes failed. Last error: {}",
        last_error.unwrap_or_default()
    ))
}

/// Dials `host:port`, sends `request` as a single frame, and reads back one
/// response frame, all bounded by [`NODE_TIMEOUT`].
pub async fn send_to_node(host: &str, port: u16, request: &Request) -> Result<Response, ProtocolError> {
    timeout(NODE_TIMEOUT, send_to_node_inner(host, port, request))
        .await
        .map_err(|_| ProtocolError::ConnectionClosed)?
}

async fn send_to_node_inner(host: &str, port: u16, request: &Request) -> Result<Response, ProtocolError> {
    let mut stream = TcpStream::connect((host, port)).await?;
    let payload = serde_json::to_vec(request)?;
    write_frame(&mut stream, &payload).await?;
    let bytes = read_frame(&mut stream, NODE_FRAME_LIMIT).await?;
    let response: Response = serde_json::from_slice(&bytes)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::NodeDescriptor;
    use protocol::Operation;

    #[tokio::test]
    async fn empty_ring_reports_no_available_nodes() {
        let state = ClusterState::new();
        let request = Request::data(Operation::Get, "k", None);
        let response = route_request(&state, &request, "k").await;
        assert_eq!(response.error.as_deref(), Some("No available nodes"));
    }

    #[tokio::test]
    async fn unreachable_nodes_surface_all_failed() {
        let state = ClusterState::new();
        // Nothing is listening on these ports.
        state.register_node_default(NodeDescriptor::new("node_0", "127.0.0.1", 1));
        let request = Request::data(Operation::Get, "k", None);
        let response = route_request(&state, &request, "k").await;
        assert_eq!(response.success, Some(false));
        assert!(response.error.unwrap().starts_with("All nodes failed."));
    }
}
