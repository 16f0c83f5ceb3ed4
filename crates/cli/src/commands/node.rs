//! `shardkv node` — run a storage node.

use std::sync::Arc;

use clap::Args;
use kvnode::{ReplicaAddr, StorageNode};

#[derive(Debug, Args)]
pub struct NodeArgs {
    /// This node's id, used when registering with a coordinator and
    /// reported in `HEALTH` responses.
    #[arg(long)]
    pub node_id: String,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long)]
    pub port: u16,

    /// If set, this node is a replica of the named primary and never
    /// fans writes out further.
    #[arg(long)]
    pub replica_of: Option<String>,

    /// Replicas to fan writes out to, formatted `id@host:port`. Ignored if
    /// `--replica-of` is set. May be repeated.
    #[arg(long = "replica", value_parser = parse_replica)]
    pub replicas: Vec<ReplicaAddr>,
}

fn parse_replica(raw: &str) -> Result<ReplicaAddr, String> {
    let (node_id, address) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected id@host:port, got `{raw}`"))?;
    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| format!("expected id@host:port, got `{raw}`"))?;
    let port: u16 = port.parse().map_err(|_| format!("invalid port in `{raw}`"))?;
    Ok(ReplicaAddr::new(node_id, host, port))
}

pub fn run(args: NodeArgs) -> super::CommandResult {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let node = match args.replica_of {
            Some(primary_id) => Arc::new(StorageNode::new_replica(&args.node_id, primary_id)),
            None => {
                let node = Arc::new(StorageNode::new(&args.node_id));
                for replica in args.replicas {
                    node.add_replica(replica);
                }
                node
            }
        };

        let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
        tracing::info!(node_id = %args.node_id, host = %args.host, port = args.port, "node listening");
        kvnode::serve(listener, node).await;
        Ok(())
    })
}
