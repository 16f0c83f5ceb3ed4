//! `shardkv ring` — build a scratch ring in-process and describe it.

use clap::Args;
use corelib::node::{Node, NodeId};
use corelib::ring::HashRing;
use corelib::topology::Topology;

#[derive(Debug, Args)]
pub struct RingArgs {
    /// Comma-separated node names to place on the ring.
    #[arg(long, value_delimiter = ',', default_value = "node1,node2,node3")]
    pub nodes: Vec<String>,

    /// Virtual nodes per physical node.
    #[arg(long, default_value_t = 256)]
    pub vnodes: usize,
}

pub fn run(args: RingArgs) -> super::CommandResult {
    let ring = HashRing::new();
    for (i, name) in args.nodes.iter().enumerate() {
        ring.add_node(Node::new(NodeId((i + 1) as u128), name.clone()), args.vnodes);
    }

    let topology = Topology::new(ring);
    print!("{}", topology.describe());
    Ok(())
}
