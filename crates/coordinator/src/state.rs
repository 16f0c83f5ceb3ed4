//! Shared cluster state: the node registry and the ring derived from it.
//!
//! Both are read on every request and mutated only by `REGISTER`/unregister,
//! so a single `parking_lot::RwLock` around one struct (rather than two
//! separately-locked fields) keeps the registry and the ring from ever
//! observing each other mid-update (spec.md §5's reader-writer discipline).

use std::collections::HashMap;

use corelib::ring::md5_ring::{Md5Ring, DEFAULT_VIRTUAL_NODES};
use parking_lot::RwLock;

use crate::descriptor::NodeDescriptor;

/// The coordinator's view of the cluster: who's registered, and where they
/// sit on the ring.
#[derive(Default)]
struct Inner {
    ring: Md5Ring,
    descriptors: HashMap<String, NodeDescriptor>,
}

/// Shared, lock-protected cluster state.
///
/// Cloning is cheap (an `Arc` under the hood via `parking_lot::RwLock`
/// wrapped in this struct is itself shared by reference from callers, who
/// hold it behind their own `Arc<ClusterState>` — this type does not own an
/// `Arc` itself, matching the teacher's preference for explicit sharing at
/// the call site rather than baking it into the type).
#[derive(Default)]
pub struct ClusterState {
    inner: RwLock<Inner>,
}

impl ClusterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node, replacing any vnodes it already held.
    ///
    /// De-duplicates rather than accumulates (spec.md §9 Open Question,
    /// decided in DESIGN.md): a second `REGISTER` for the same `node_id`
    /// must still leave exactly `vnodes` ring entries, not `2 * vnodes`.
    pub fn register_node(&self, descriptor: NodeDescriptor, vnodes: usize) {
        let mut inner = self.inner.write();
        inner.ring.reregister_node(&descriptor.node_id, vnodes);
        inner.descriptors.insert(descriptor.node_id.clone(), descriptor);
    }

    /// Registers a node with the default virtual-node count.
    pub fn register_node_default(&self, descriptor: NodeDescriptor) {
        self.register_node(descriptor, DEFAULT_VIRTUAL_NODES)
    }

    /// Removes a node from the ring and the registry.
    pub fn unregister_node(&self, node_id: &str) {
        let mut inner = self.inner.write();
        inner.ring.remove_node(node_id);
        inner.descriptors.remove(node_id);
    }

    /// Ordered successor list of up to `count` distinct node ids for `key`.
    pub fn successors_for_key(&self, key: &str, count: usize) -> Vec<String> {
        self.inner.read().ring.get_nodes(key, count)
    }

    /// Looks up a registered descriptor by id.
    pub fn descriptor(&self, node_id: &str) -> Option<NodeDescriptor> {
        self.inner.read().descriptors.get(node_id).cloned()
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.inner.read().descriptors.len()
    }

    /// All registered node ids, for the `HEALTH` response.
    pub fn node_ids(&self) -> Vec<String> {
        self.inner.read().descriptors.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_lookup_descriptor() {
        let state = ClusterState::new();
        state.register_node_default(NodeDescriptor::new("node_0", "127.0.0.1", 9000));
        assert_eq!(state.node_count(), 1);
        assert_eq!(
            state.descriptor("node_0"),
            Some(NodeDescriptor::new("node_0", "127.0.0.1", 9000))
        );
    }

    #[test]
    fn re_register_keeps_exactly_v_entries() {
        let state = ClusterState::new();
        state.register_node(NodeDescriptor::new("node_0", "h", 1), 16);
        state.register_node(NodeDescriptor::new("node_0", "h", 1), 16);
        assert_eq!(state.node_count(), 1);
        assert_eq!(state.successors_for_key("k", 1).len(), 1);
    }

    #[test]
    fn unregister_removes_from_ring_and_registry() {
        let state = ClusterState::new();
        state.register_node_default(NodeDescriptor::new("node_0", "h", 1));
        state.unregister_node("node_0");
        assert_eq!(state.node_count(), 0);
        assert!(state.successors_for_key("k", 1).is_empty());
    }

    #[test]
    fn successors_skip_removed_nodes() {
        let state = ClusterState::new();
        for n in ["node_0", "node_1", "node_2"] {
            state.register_node(NodeDescriptor::new(n, "h", 1), 32);
        }
        state.unregister_node("node_1");
        for key in ["a", "b", "c", "d"] {
            assert!(!state.successors_for_key(key, 2).contains(&"node_1".to_string()));
        }
    }
}
