//! Comprehensive tests for the hash ring implementation.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup
//! 2. **Multiple nodes**: Distribution, consistency
//! 3. **Edge cases**: Wraparound, single node, zero weight, duplicate keys
//! 4. **Membership changes**: Rebuilding without a node

use ketama::hash::{BuildHasher32, Hasher32};
use ketama::{HashRing, Position, RingBuilder};
use std::collections::HashMap;
use std::sync::Arc;

/// Hash builder with hand-picked positions, for placing points exactly.
///
/// Inputs found in the table hash to the given position; anything else must
/// be a decimal number and hashes to itself.
#[derive(Clone, Default)]
struct TableHash(Arc<HashMap<String, u32>>);

impl TableHash {
    fn new(entries: &[(&str, u32)]) -> Self {
        TableHash(Arc::new(
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        ))
    }
}

struct TableHasher {
    table: Arc<HashMap<String, u32>>,
    input: Vec<u8>,
}

impl Hasher32 for TableHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.input.extend_from_slice(bytes);
    }

    fn sum32(&self) -> u32 {
        let input = String::from_utf8_lossy(&self.input);
        match self.table.get(input.as_ref()) {
            Some(position) => *position,
            None => input.parse().expect("test keys are numeric"),
        }
    }

    fn reset(&mut self) {
        self.input.clear();
    }
}

impl BuildHasher32 for TableHash {
    type Hasher = TableHasher;

    fn build_hasher(&self) -> TableHasher {
        TableHasher {
            table: Arc::clone(&self.0),
            input: Vec::new(),
        }
    }
}

fn table_ring() -> HashRing<&'static str, TableHash> {
    let hasher = TableHash::new(&[
        ("a:0", 100),
        ("a:1", 300),
        ("b:0", 200),
        ("b:1", 400),
    ]);
    RingBuilder::new()
        .with_spots(2)
        .with_hasher(hasher)
        .add_node("a", "node-a", 1)
        .add_node("b", "node-b", 1)
        .build()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_lookup() {
    let ring: HashRing<String> = HashRing::new();
    assert_eq!(ring.get("key1"), "");
    assert_eq!(ring.lookup("key1"), None);
    assert!(ring.locate("key1").is_none());
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.len(), 0);
}

#[test]
fn test_empty_after_prepare_and_zero_weights() {
    let mut ring = HashRing::with_spots(100);
    ring.add("a", 7u64, 0);
    ring.add("b", 9u64, 0);
    ring.prepare();
    for key in ["x", "y", "z"] {
        assert_eq!(ring.get(key), 0);
        assert_eq!(ring.lookup(key), None);
    }
}

#[test]
fn test_add_node_and_lookup() {
    let mut ring = HashRing::new();
    ring.add("node1", 1u32, 1);
    ring.prepare();

    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.get("test-key"), 1);

    let point = ring.locate("test-key").expect("ring is not empty");
    assert_eq!(point.key(), "node1");
}

// ============================================================================
// Multiple Nodes Tests
// ============================================================================

#[test]
fn test_multiple_nodes() {
    let ring = RingBuilder::new()
        .add_node("node1", 1, 1)
        .add_node("node2", 2, 1)
        .add_node("node3", 3, 1)
        .build();

    assert_eq!(ring.node_count(), 3);
    assert_eq!(ring.len(), 12);

    for key in ["key1", "key2", "key3"] {
        assert!([1, 2, 3].contains(&ring.get(key)));
    }
}

#[test]
fn test_consistent_lookup() {
    let ring = RingBuilder::new()
        .with_spots(50)
        .add_node("node1", "node1", 1)
        .add_node("node2", "node2", 1)
        .build();

    let first = ring.get("consistent-key");
    for _ in 0..10 {
        assert_eq!(ring.get("consistent-key"), first);
    }
}

#[test]
fn test_identical_rings_agree() {
    let build = || {
        RingBuilder::new()
            .with_spots(100)
            .add_node("a", 'a', 1)
            .add_node("b", 'b', 2)
            .add_node("c", 'c', 3)
            .build()
    };
    let (left, right) = (build(), build());
    for i in 0..1_000 {
        let key = format!("key-{i}");
        assert_eq!(left.get(&key), right.get(&key));
    }
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_successor_search() {
    let ring = table_ring();
    assert_eq!(ring.get("50"), "node-a");
    assert_eq!(ring.get("100"), "node-a"); // exact hit
    assert_eq!(ring.get("101"), "node-b");
    assert_eq!(ring.get("250"), "node-a");
    assert_eq!(ring.get("400"), "node-b");
}

#[test]
fn test_wraparound_to_first_point() {
    let ring = table_ring();
    assert_eq!(ring.get("401"), "node-a");
    assert_eq!(ring.get(u32::MAX.to_string()), "node-a");
    assert_eq!(
        ring.locate("401").map(|p| p.position()),
        Some(Position(100))
    );
}

#[test]
fn test_single_node() {
    let mut ring = HashRing::new();
    ring.add("node1", "node1", 1);
    ring.prepare();

    for key in ["key1", "key2", "key3", "very-long-key-name"] {
        assert_eq!(ring.get(key), "node1");
    }
}

#[test]
fn test_byte_keys() {
    let ring = table_ring();
    assert_eq!(ring.get(b"250"), "node-a");
    assert_eq!(ring.get(vec![b'4', b'0', b'1']), "node-a");
}

#[test]
fn test_add_after_prepare_then_reprepare() {
    let mut ring = HashRing::with_spots(100);
    ring.add("a", "a", 1);
    ring.prepare();
    ring.add("b", "b", 1);
    ring.prepare();

    let fresh = RingBuilder::new()
        .with_spots(100)
        .add_node("a", "a", 1)
        .add_node("b", "b", 1)
        .build();
    for i in 0..1_000 {
        let key = format!("k{i}");
        assert_eq!(ring.get(&key), fresh.get(&key));
    }
}

// ============================================================================
// Membership Changes
// ============================================================================

#[test]
fn test_remove_node_only_its_keys_move() {
    let nodes = [("a", 1), ("b", 1), ("c", 2), ("d", 3)];
    let build = |skip: Option<&str>| {
        RingBuilder::new()
            .with_spots(100)
            .add_nodes(
                nodes
                    .iter()
                    .filter(|(key, _)| Some(*key) != skip)
                    .map(|(key, weight)| (*key, key.to_string(), *weight)),
            )
            .build()
    };

    let before = build(None);
    let after = build(Some("c"));

    let mut moved = 0;
    for i in 0..20_000 {
        let key = format!("key-{i}");
        let old = before.get(&key);
        let new = after.get(&key);
        if old == "c" {
            assert_ne!(new, "c");
            moved += 1;
        } else {
            assert_eq!(old, new, "{key} was on {old} but moved to {new}");
        }
    }
    assert!(moved > 0);
}

#[test]
fn test_add_node_moves_bounded_fraction() {
    let base = RingBuilder::new()
        .with_spots(100)
        .add_node("a", "a", 1)
        .add_node("b", "b", 1);
    let before = base.clone().build();
    let after = base.add_node("c", "c", 1).build();

    let total = 10_000;
    let moved = (0..total)
        .map(|i| format!("key-{i}"))
        .filter(|key| before.get(key) != after.get(key))
        .inspect(|key| assert_eq!(after.get(key), "c"))
        .count();

    let ratio = moved as f64 / total as f64;
    assert!(
        (0.2..=0.45).contains(&ratio),
        "expected about a third of keys to move, got {ratio:.2}"
    );
}
