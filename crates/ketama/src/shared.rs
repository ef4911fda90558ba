//! Rebuild-and-swap handle for rings that change membership while serving.
//!
//! A [`HashRing`] is never mutated once published. To change membership,
//! build a new ring off to the side and [`publish`](SharedRing::publish) it;
//! readers that already hold the old ring keep using it until they drop it.

use crate::hash::{BuildHasher32, DefaultHashBuilder};
use crate::ring::HashRing;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// A ring that can be atomically replaced.
pub struct SharedRing<T, S = DefaultHashBuilder> {
    current: RwLock<Arc<HashRing<T, S>>>,
}

impl<T, S: BuildHasher32> SharedRing<T, S> {
    /// Wraps `ring`, preparing it first if needed.
    pub fn new(mut ring: HashRing<T, S>) -> Self {
        if !ring.is_prepared() {
            ring.prepare();
        }
        Self {
            current: RwLock::new(Arc::new(ring)),
        }
    }

    /// Returns the ring currently published.
    ///
    /// The read lock is held only long enough to clone the `Arc`.
    pub fn load(&self) -> Arc<HashRing<T, S>> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the published ring and returns the previous one.
    pub fn publish(&self, mut ring: HashRing<T, S>) -> Arc<HashRing<T, S>> {
        if !ring.is_prepared() {
            ring.prepare();
        }
        let points = ring.len();
        let nodes = ring.node_count();
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(ring));
        debug!(nodes, points, "published new ring");
        previous
    }

    /// Resolves `key` against the current ring.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> T
    where
        T: Clone + Default,
    {
        self.current.read().get(key)
    }
}

impl<T, S: BuildHasher32> From<HashRing<T, S>> for SharedRing<T, S> {
    fn from(ring: HashRing<T, S>) -> Self {
        Self::new(ring)
    }
}

impl<T, S> std::fmt::Debug for SharedRing<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRing")
            .field("ring", &*self.current.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::RingBuilder;

    fn ring(nodes: &[&str]) -> HashRing<String> {
        RingBuilder::new()
            .with_spots(64)
            .add_nodes(nodes.iter().map(|n| (*n, n.to_string(), 1)))
            .build()
    }

    #[test]
    fn test_new_prepares() {
        let mut unprepared = HashRing::new();
        unprepared.add("a", "a".to_string(), 1);
        let shared = SharedRing::new(unprepared);
        assert!(shared.load().is_prepared());
        assert_eq!(shared.get("anything"), "a");
    }

    #[test]
    fn test_publish_swaps_and_returns_previous() {
        let shared = SharedRing::new(ring(&["a"]));
        let held = shared.load();

        let previous = shared.publish(ring(&["b"]));
        assert_eq!(previous.get("key"), "a");
        assert_eq!(shared.get("key"), "b");
        // Readers holding the old ring are unaffected.
        assert_eq!(held.get("key"), "a");
    }

    #[test]
    fn test_concurrent_readers_during_publish() {
        let shared = SharedRing::new(ring(&["a", "b"]));

        crossbeam::scope(|s| {
            for t in 0..4 {
                let shared = &shared;
                s.spawn(move |_| {
                    for i in 0..2_000 {
                        let owner = shared.get(format!("key-{t}-{i}"));
                        assert!(["a", "b", "c"].contains(&owner.as_str()));
                    }
                });
            }
            s.spawn(|_| {
                shared.publish(ring(&["a", "b", "c"]));
            });
        })
        .unwrap();

        assert_eq!(shared.load().node_count(), 3);
    }
}
