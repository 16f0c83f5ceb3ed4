//! The coordinator's TCP front door.
//!
//! Grounded on `original_source/coordinator.py`'s `start_server`/
//! `_handle_client`/`_process_client_request`, translated from
//! "accept, spawn a daemon thread per connection" to "accept, `tokio::spawn`
//! a task per connection" (spec.md §5's "parallel workers").

use std::sync::Arc;

use protocol::{read_frame, write_frame, Operation, Request, Response, CLIENT_REQUEST_LIMIT};
use tokio::net::{TcpListener, TcpStream};

use crate::descriptor::NodeDescriptor;
use crate::routing::route_request;
use crate::state::ClusterState;

/// Number of virtual nodes a freshly registered node is given, absent an
/// explicit override (spec.md's default is `original_source`'s 150).
pub const DEFAULT_VIRTUAL_NODES: usize = corelib::ring::md5_ring::DEFAULT_VIRTUAL_NODES;

/// Runs the coordinator's accept loop on `listener` until the listener
/// itself errors (spec.md §4.1's "in practice the source only stops
/// accepting when the listener errors").
pub async fn serve(listener: TcpListener, state: Arc<ClusterState>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    if let Err(err) = handle_client(stream, &state).await {
                        tracing::debug!(%addr, error = %err, "client connection ended with an error");
                    }
                });
            }
            Err(err) => {
                tracing::error!(error = %err, "accept failed, stopping coordinator");
                break;
            }
        }
    }
}

async fn handle_client(mut stream: TcpStream, state: &ClusterState) -> Result<(), protocol::ProtocolError> {
    let bytes = read_frame(&mut stream, CLIENT_REQUEST_LIMIT).await?;
    let response = match serde_json::from_slice::<Request>(&bytes) {
        Ok(request) => process_client_request(state, request).await,
        Err(err) => Response::error(err.to_string()),
    };
    let payload = serde_json::to_vec(&response)?;
    write_frame(&mut stream, &payload).await?;
    Ok(())
}

async fn process_client_request(state: &ClusterState, request: Request) -> Response {
    match request.operation {
        Operation::Set | Operation::Get | Operation::Delete => {
            let Some(key) = request.key.clone() else {
                return Response::error("missing field: key");
            };
            route_request(state, &request, &key).await
        }
        Operation::Health => Response::cluster_health(state.node_count(), state.node_ids()),
        Operation::Register => match (request.node_id, request.host, request.port) {
            (Some(node_id), Some(host), Some(port)) => {
                state.register_node_default(NodeDescriptor::new(&node_id, host, port));
                Response::registered(&node_id)
            }
            _ => Response::error("Missing registration details"),
        },
    }
}
