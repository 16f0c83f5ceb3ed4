//! Hash ring data structure.
//!
//! General-purpose, partitioner-agnostic ring over `Murmur3Token`. Interior
//! mutable (`add_node`/`remove_node` take `&self`) so a single `HashRing` can
//! be shared via `Clone` (cheap — clones an `Arc`) across threads, matching
//! `Topology`'s "can be created from a shared `Arc<HashRing>`" contract.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::node::{Node, NodeId};
use crate::partitioner::murmur3::Murmur3Partitioner;
use crate::partitioner::traits::Partitioner;
use crate::token::murmur3::Murmur3Token;

const DEFAULT_VNODES: usize = 256;

struct Inner {
    /// Sorted token -> owning node id. `BTreeMap` keeps this in ascending
    /// order automatically and gives us O(log n) "first entry >= target".
    ring: Mutex<BTreeMap<Murmur3Token, NodeId>>,
    /// Node metadata, keyed by id.
    nodes: DashMap<NodeId, Node>,
    /// Next unused vnode index per node, so repeated `add_node` calls for the
    /// same id keep appending distinct vnodes rather than re-hashing the same
    /// names.
    next_vnode_index: DashMap<NodeId, usize>,
    partitioner: Murmur3Partitioner,
}

/// The main hash ring type: a sorted set of virtual-node tokens mapped to
/// physical nodes.
#[derive(Clone)]
pub struct HashRing {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for HashRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRing")
            .field("node_count", &self.node_count())
            .field("token_count", &self.token_count())
            .finish()
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HashRing {
    /// Creates an empty ring.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                ring: Mutex::new(BTreeMap::new()),
                nodes: DashMap::new(),
                next_vnode_index: DashMap::new(),
                partitioner: Murmur3Partitioner,
            }),
        }
    }

    /// Adds `vnodes` virtual nodes for `node`, continuing from wherever this
    /// node's vnode index counter last left off (so calling this twice for
    /// the same node id appends more vnodes rather than replacing them).
    pub fn add_node(&self, node: Node, vnodes: usize) {
        let id = node.id;
        let mut next_index = self.inner.next_vnode_index.entry(id).or_insert(0);

        let mut ring = self.inner.ring.lock();
        for _ in 0..vnodes {
            let name = format!("{}:{}", id, *next_index);
            let token = self.inner.partitioner.partition(name.as_bytes());
            ring.insert(token, id);
            *next_index += 1;
        }
        drop(ring);

        self.inner.nodes.insert(id, node);
    }

    /// Removes every vnode owned by `id`. Returns `true` if the node existed.
    pub fn remove_node(&self, id: &NodeId) -> bool {
        let existed = self.inner.nodes.remove(id).is_some();
        if existed {
            self.inner.ring.lock().retain(|_, owner| owner != id);
            self.inner.next_vnode_index.remove(id);
        }
        existed
    }

    /// Finds the node responsible for `key`: the node owning the first ring
    /// entry with token >= hash(key), wrapping to the first entry otherwise.
    pub fn lookup(&self, key: &[u8]) -> Option<NodeId> {
        let token = self.inner.partitioner.partition(key);
        let ring = self.inner.ring.lock();
        ring.range(token..)
            .next()
            .or_else(|| ring.iter().next())
            .map(|(_, id)| *id)
    }

    /// Same as `lookup`, but returns full node metadata.
    pub fn lookup_node(&self, key: &[u8]) -> Option<Node> {
        let id = self.lookup(key)?;
        self.get_node(&id)
    }

    /// Returns metadata for a node id, if present.
    pub fn get_node(&self, id: &NodeId) -> Option<Node> {
        self.inner.nodes.get(id).map(|entry| entry.clone())
    }

    /// Number of distinct physical nodes in the ring.
    pub fn node_count(&self) -> usize {
        self.inner.nodes.len()
    }

    /// Number of vnode tokens in the ring.
    pub fn token_count(&self) -> usize {
        self.inner.ring.lock().len()
    }

    /// All physical nodes currently in the ring.
    pub fn nodes(&self) -> Vec<Node> {
        self.inner.nodes.iter().map(|e| e.value().clone()).collect()
    }

    /// All (token, owning node) pairs currently in the ring.
    pub fn tokens(&self) -> Vec<(Murmur3Token, NodeId)> {
        self.inner.ring.lock().iter().map(|(t, n)| (*t, *n)).collect()
    }

    /// Name of the partitioner backing this ring.
    pub fn partitioner_name(&self) -> &'static str {
        self.inner.partitioner.name()
    }
}

/// Builder for constructing a `HashRing` with a fluent API.
pub struct RingBuilder {
    default_vnodes: usize,
    pending: Vec<(Node, Option<usize>)>,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RingBuilder {
    /// Starts a new builder with the default vnode count (256).
    pub fn new() -> Self {
        Self {
            default_vnodes: DEFAULT_VNODES,
            pending: Vec::new(),
        }
    }

    /// Sets the default vnode count used by `add_node`.
    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.default_vnodes = vnodes;
        self
    }

    /// Queues a node to be added with the builder's default vnode count.
    pub fn add_node(mut self, node: Node) -> Self {
        self.pending.push((node, None));
        self
    }

    /// Queues a node to be added with a specific vnode count, overriding the
    /// builder's default for this node only.
    pub fn add_node_with_vnodes(mut self, node: Node, vnodes: usize) -> Self {
        self.pending.push((node, Some(vnodes)));
        self
    }

    /// Builds the ring, applying every queued node in order.
    pub fn build(self) -> HashRing {
        let ring = HashRing::new();
        for (node, vnodes) in self.pending {
            ring.add_node(node, vnodes.unwrap_or(self.default_vnodes));
        }
        ring
    }
}
