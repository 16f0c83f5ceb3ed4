//! The storage node's TCP front door.
//!
//! Grounded on `original_source/kv_node.py`'s `start_server`/
//! `_handle_client`/`_process_request`, translated to `tokio::spawn` per
//! connection.

use std::sync::Arc;

use protocol::{read_frame, write_frame, Operation, Request, Response, NODE_FRAME_LIMIT};
use tokio::net::{TcpListener, TcpStream};

use crate::node::StorageNode;

/// Runs the node's accept loop on `listener` until it errors.
pub async fn serve(listener: TcpListener, node: Arc<StorageNode>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let node = Arc::clone(&node);
                tokio::spawn(async move {
                    if let Err(err) = handle_client(stream, &node).await {
                        tracing::debug!(%addr, error = %err, "connection ended with an error");
                    }
                });
            }
            Err(err) => {
                tracing::error!(error = %err, "accept failed, stopping node");
                break;
            }
        }
    }
}

async fn handle_client(mut stream: TcpStream, node: &StorageNode) -> Result<(), protocol::ProtocolError> {
    let bytes = read_frame(&mut stream, NODE_FRAME_LIMIT).await?;
    let response = match serde_json::from_slice::<Request>(&bytes) {
        Ok(request) => process_request(node, request).await,
        Err(err) => Response::error(err.to_string()),
    };
    let payload = serde_json::to_vec(&response)?;
    write_frame(&mut stream, &payload).await?;
    Ok(())
}

async fn process_request(node: &StorageNode, request: Request) -> Response {
    let Some(key) = request.key.as_deref() else {
        if request.operation == Operation::Health {
            return Response::node_health(node.node_id(), node.data_size().await);
        }
        return Response::error("missing field: key");
    };

    match request.operation {
        Operation::Set => {
            let success = if request.sync {
                node.replicate_set(key, request.value.unwrap_or(serde_json::Value::Null)).await
            } else {
                node.set(key, request.value.unwrap_or(serde_json::Value::Null)).await
            };
            Response::of(Operation::Set, success)
        }
        Operation::Get => Response::get_result(node.get(key).await),
        Operation::Delete => {
            let success = if request.sync {
                node.replicate_delete(key).await
            } else {
                node.delete(key).await
            };
            Response::of(Operation::Delete, success)
        }
        Operation::Health => Response::node_health(node.node_id(), node.data_size().await),
        Operation::Register => Response::error("Unknown operation: REGISTER"),
    }
}
