//! Node descriptors: the address book entry the coordinator keeps for every
//! registered storage node.

use serde::{Deserialize, Serialize};

/// Everything the coordinator needs to dial a node: grounded on
/// `original_source/coordinator.py`'s `self.nodes[node_id] = {'host':...,
/// 'port':..., 'node_id':...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub node_id: String,
    pub host: String,
    pub port: u16,
}

impl NodeDescriptor {
    pub fn new(node_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            node_id: node_id.into(),
            host: host.into(),
            port,
        }
    }

    /// The `host:port` pair to connect to.
    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
