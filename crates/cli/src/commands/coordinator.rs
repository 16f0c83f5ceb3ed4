//! `shardkv coordinator` — run a coordinator process.

use std::sync::Arc;

use clap::Args;
use coordinator::{ClusterState, NodeDescriptor};

#[derive(Debug, Args)]
pub struct CoordinatorArgs {
    /// Address to listen on for client and node traffic.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 9000)]
    pub port: u16,

    /// Pre-register a storage node at startup, formatted `id@host:port`.
    /// May be repeated.
    #[arg(long = "register", value_parser = parse_registration)]
    pub registrations: Vec<NodeDescriptor>,
}

fn parse_registration(raw: &str) -> Result<NodeDescriptor, String> {
    let (node_id, address) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected id@host:port, got `{raw}`"))?;
    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| format!("expected id@host:port, got `{raw}`"))?;
    let port: u16 = port.parse().map_err(|_| format!("invalid port in `{raw}`"))?;
    Ok(NodeDescriptor::new(node_id, host, port))
}

pub fn run(args: CoordinatorArgs) -> super::CommandResult {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let state = Arc::new(ClusterState::new());
        for descriptor in args.registrations {
            tracing::info!(node_id = %descriptor.node_id, "pre-registering node");
            state.register_node_default(descriptor);
        }

        let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
        tracing::info!(host = %args.host, port = args.port, "coordinator listening");
        coordinator::serve(listener, state).await;
        Ok(())
    })
}
