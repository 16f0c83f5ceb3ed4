//! Property-based coverage for `Md5Ring`, the ring used by the key-value
//! store (as opposed to `ring_test.rs`, which covers the generic `HashRing`).

use std::collections::HashSet;

use corelib::ring::md5_ring::Md5Ring;
use proptest::prelude::*;

fn node_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("node_{i}")).collect()
}

proptest! {
    /// Ring balance: n distinct ids each get exactly V entries, and
    /// `get_nodes(k, c)` returns `min(c, n)` distinct ids.
    #[test]
    fn ring_balance_holds(n in 1usize..8, vnodes in 1usize..64, count in 1usize..10) {
        let mut ring = Md5Ring::new();
        for name in node_names(n) {
            ring.add_node(&name, vnodes);
        }
        prop_assert_eq!(ring.node_count(), n);
        prop_assert_eq!(ring.token_count(), n * vnodes);

        let found = ring.get_nodes("some-key", count);
        prop_assert_eq!(found.len(), count.min(n));
        let distinct: HashSet<_> = found.iter().collect();
        prop_assert_eq!(distinct.len(), found.len());
    }

    /// Placement determinism: insertion order never changes where a key lands.
    #[test]
    fn placement_is_order_independent(n in 1usize..8, seed in 0u64..64) {
        let names = node_names(n);
        let mut shuffled = names.clone();
        // Deterministic "shuffle" from the seed, no RNG dependency needed.
        shuffled.rotate_left((seed as usize) % n.max(1));

        let mut a = Md5Ring::new();
        for name in &names {
            a.add_node(name, 32);
        }
        let mut b = Md5Ring::new();
        for name in &shuffled {
            b.add_node(name, 32);
        }

        for key in ["user:1", "user:2", "product:7", "k"] {
            prop_assert_eq!(a.get_node(key), b.get_node(key));
        }
    }

    /// After removing an arbitrary non-empty subset of nodes, `get_nodes`
    /// only ever returns ids that still exist.
    #[test]
    fn get_nodes_skips_removed_ids(n in 2usize..8, to_remove in 1usize..8) {
        let names = node_names(n);
        let mut ring = Md5Ring::new();
        for name in &names {
            ring.add_node(name, 32);
        }

        let removed: Vec<_> = names.iter().take(to_remove.min(n - 1)).cloned().collect();
        for name in &removed {
            ring.remove_node(name);
        }

        for key in ["a", "b", "c", "d", "e", "f"] {
            let found = ring.get_nodes(key, n);
            for id in &found {
                prop_assert!(!removed.contains(id));
            }
        }
    }
}
