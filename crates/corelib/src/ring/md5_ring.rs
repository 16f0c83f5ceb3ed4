//! The MD5-based consistent hash ring used by the KV store.
//!
//! Grounded directly on `original_source/consistent_hashing.py`'s
//! `ConsistentHash`: MD5(key) as a 128-bit big-endian integer, a sorted
//! vnode table, "first entry with hash >= target, wrap to the first entry"
//! lookup. Unlike `ring::HashRing`, this type has no interior locking of its
//! own — callers (the coordinator) already hold it behind a single
//! `RwLock<ClusterState>`, so a second lock here would just add contention
//! for no benefit.

use std::collections::BTreeMap;

use crate::token::md5::Md5Token;

/// The KV store identifies nodes by opaque string id (e.g. `"node_0"`), not
/// by `corelib::node::NodeId` (a `u128` ring-topology identifier used by the
/// generic `HashRing`) — the two crates model different things that happen
/// to share the word "node".
pub type NodeId = String;

/// Default number of virtual nodes per physical node, per spec.
pub const DEFAULT_VIRTUAL_NODES: usize = 150;

/// A consistent hash ring keyed by MD5 tokens.
///
/// # Invariants
/// - `sorted` never contains duplicate tokens.
/// - Every node added via `add_node(id, v)` occupies exactly `v` distinct
///   ring entries until removed.
#[derive(Debug, Clone, Default)]
pub struct Md5Ring {
    sorted: BTreeMap<Md5Token, NodeId>,
}

impl Md5Ring {
    /// Creates an empty ring.
    pub fn new() -> Self {
        Self {
            sorted: BTreeMap::new(),
        }
    }

    /// Adds `vnodes` virtual entries named `"{id}:0" .. "{id}:{vnodes-1}"`.
    ///
    /// If a generated name collides with an existing token (assumed absent
    /// in practice; MD5 collisions are not modeled as a real risk here), the
    /// later insertion wins, consistent with `BTreeMap::insert`'s semantics —
    /// which keeps the sorted index and the map itself intrinsically
    /// consistent, since they're the same structure.
    pub fn add_node(&mut self, id: &str, vnodes: usize) {
        for i in 0..vnodes {
            let name = format!("{}:{}", id, i);
            let token = Md5Token::from_key(&name);
            self.sorted.insert(token, id.to_string());
        }
    }

    /// Removes every vnode entry owned by `id`.
    pub fn remove_node(&mut self, id: &str) {
        self.sorted.retain(|_, owner| owner != id);
    }

    /// Re-registers a node: removes any vnodes it already owns, then adds
    /// exactly `vnodes` fresh ones. This is what makes `REGISTER`
    /// idempotent at the ring layer (spec.md §9 Open Question).
    pub fn reregister_node(&mut self, id: &str, vnodes: usize) {
        self.remove_node(id);
        self.add_node(id, vnodes);
    }

    /// Total number of distinct node ids present in the ring.
    pub fn node_count(&self) -> usize {
        self.sorted.values().collect::<std::collections::HashSet<_>>().len()
    }

    /// Total number of vnode entries.
    pub fn token_count(&self) -> usize {
        self.sorted.len()
    }

    /// Returns the node responsible for `key`: the owner of the first entry
    /// with hash >= hash(key), wrapping to the smallest entry if none.
    pub fn get_node(&self, key: &str) -> Option<NodeId> {
        let token = Md5Token::from_key(key);
        self.sorted
            .range(token..)
            .next()
            .or_else(|| self.sorted.iter().next())
            .map(|(_, id)| id.clone())
    }

    /// Returns up to `count` distinct node ids responsible for `key`,
    /// starting at the same ring position as `get_node` and walking forward
    /// (wrapping at most once), in ring order.
    ///
    /// Returns fewer than `count` ids only if the ring has fewer than
    /// `count` distinct node ids.
    pub fn get_nodes(&self, key: &str, count: usize) -> Vec<NodeId> {
        if count == 0 || self.sorted.is_empty() {
            return Vec::new();
        }

        let token = Md5Token::from_key(key);
        let start = self
            .sorted
            .range(token..)
            .next()
            .map(|(t, _)| *t)
            .unwrap_or_else(|| *self.sorted.keys().next().unwrap());

        let mut result = Vec::with_capacity(count);
        let mut seen = std::collections::HashSet::new();

        let after_start = self.sorted.range(start..).chain(self.sorted.range(..start));
        for (_, id) in after_start {
            if seen.insert(id.clone()) {
                result.push(id.clone());
                if result.len() == count {
                    break;
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        s.to_string()
    }

    #[test]
    fn empty_ring_has_no_node() {
        let ring = Md5Ring::new();
        assert_eq!(ring.get_node("k"), None);
        assert_eq!(ring.get_nodes("k", 2), Vec::new());
    }

    #[test]
    fn ring_balance() {
        let mut ring = Md5Ring::new();
        for n in ["node_0", "node_1", "node_2"] {
            ring.add_node(&id(n), DEFAULT_VIRTUAL_NODES);
        }
        assert_eq!(ring.node_count(), 3);
        assert_eq!(ring.token_count(), 3 * DEFAULT_VIRTUAL_NODES);
    }

    #[test]
    fn placement_is_deterministic_regardless_of_insertion_order() {
        let mut a = Md5Ring::new();
        a.add_node(&id("node_0"), 32);
        a.add_node(&id("node_1"), 32);
        a.add_node(&id("node_2"), 32);

        let mut b = Md5Ring::new();
        b.add_node(&id("node_2"), 32);
        b.add_node(&id("node_0"), 32);
        b.add_node(&id("node_1"), 32);

        for key in ["user:1", "user:2", "product:1", "anything-else"] {
            assert_eq!(a.get_node(key), b.get_node(key));
        }
    }

    #[test]
    fn get_nodes_returns_distinct_ids_up_to_count() {
        let mut ring = Md5Ring::new();
        for n in ["node_0", "node_1", "node_2"] {
            ring.add_node(&id(n), 32);
        }
        let found = ring.get_nodes("some-key", 2);
        assert_eq!(found.len(), 2);
        assert_ne!(found[0], found[1]);
    }

    #[test]
    fn get_nodes_caps_at_available_node_count() {
        let mut ring = Md5Ring::new();
        ring.add_node(&id("only-node"), 32);
        assert_eq!(ring.get_nodes("k", 5), vec![id("only-node")]);
    }

    #[test]
    fn reregister_keeps_exactly_v_entries() {
        let mut ring = Md5Ring::new();
        ring.add_node(&id("node_0"), 150);
        ring.reregister_node(&id("node_0"), 150);
        assert_eq!(ring.token_count(), 150);
    }

    #[test]
    fn remove_then_lookup_only_surviving_nodes() {
        let mut ring = Md5Ring::new();
        for n in ["node_0", "node_1", "node_2"] {
            ring.add_node(&id(n), 32);
        }
        ring.remove_node(&id("node_1"));
        for key in ["a", "b", "c", "d", "e"] {
            let owner = ring.get_node(key).unwrap();
            assert_ne!(owner, id("node_1"));
        }
    }
}
