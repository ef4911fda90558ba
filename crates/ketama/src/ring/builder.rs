//! Builder for hash rings.

use crate::hash::{BuildHasher32, DefaultHashBuilder};
use crate::ring::ring::{normalize_spots, HashRing, DEFAULT_SPOTS};

/// Collects configuration and nodes, then builds a prepared ring.
///
/// # Example
///
/// ```rust
/// use ketama::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_spots(100)
///     .add_node("a", 1u8, 1)
///     .add_node("b", 2u8, 3)
///     .build();
///
/// assert!(ring.is_prepared());
/// assert_eq!(ring.len(), 400);
/// ```
#[derive(Clone, Debug)]
pub struct RingBuilder<T, S = DefaultHashBuilder> {
    spots: usize,
    hasher: S,
    nodes: Vec<(String, T, u32)>,
}

impl<T> RingBuilder<T, DefaultHashBuilder> {
    pub fn new() -> Self {
        Self {
            spots: DEFAULT_SPOTS,
            hasher: DefaultHashBuilder::default(),
            nodes: Vec::new(),
        }
    }
}

impl<T> Default for RingBuilder<T, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> RingBuilder<T, S> {
    /// Virtual points per unit of weight. Zero keeps the default of 4.
    pub fn with_spots(mut self, spots: usize) -> Self {
        self.spots = normalize_spots(spots);
        self
    }

    /// Replaces the hash function.
    pub fn with_hasher<H: BuildHasher32>(self, hasher: H) -> RingBuilder<T, H> {
        RingBuilder {
            spots: self.spots,
            hasher,
            nodes: self.nodes,
        }
    }

    /// Replaces the hash function if one is given; `None` keeps the current one.
    pub fn with_hasher_opt(mut self, hasher: Option<S>) -> Self {
        if let Some(hasher) = hasher {
            self.hasher = hasher;
        }
        self
    }

    pub fn add_node(mut self, key: impl Into<String>, value: T, weight: u32) -> Self {
        self.nodes.push((key.into(), value, weight));
        self
    }

    pub fn add_nodes<I, K>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = (K, T, u32)>,
        K: Into<String>,
    {
        self.nodes
            .extend(nodes.into_iter().map(|(key, value, weight)| (key.into(), value, weight)));
        self
    }
}

impl<T: Clone, S: BuildHasher32> RingBuilder<T, S> {
    /// Adds every node in order and prepares the ring.
    pub fn build(self) -> HashRing<T, S> {
        let mut ring = HashRing::with_spots_and_hasher(self.spots, self.hasher);
        for (key, value, weight) in self.nodes {
            ring.add(&key, value, weight);
        }
        ring.prepare();
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{HashAlgorithm, Xxh3Hasher, BuildDefault};

    #[test]
    fn test_builder_defaults() {
        let ring = RingBuilder::new()
            .add_node("a", 1, 1)
            .add_node("b", 2, 1)
            .build();
        assert_eq!(ring.spots(), DEFAULT_SPOTS);
        assert_eq!(ring.len(), 8);
        assert_eq!(ring.node_count(), 2);
    }

    #[test]
    fn test_zero_spots_normalized() {
        let ring = RingBuilder::new().with_spots(0).add_node("a", (), 2).build();
        assert_eq!(ring.spots(), 4);
        assert_eq!(ring.len(), 8);
    }

    #[test]
    fn test_with_hasher_opt_none_keeps_current() {
        let ring = RingBuilder::new()
            .with_hasher(HashAlgorithm::Xxh3)
            .with_hasher_opt(None)
            .add_node("a", (), 1)
            .build();
        assert_eq!(*ring.hasher(), HashAlgorithm::Xxh3);

        let ring = RingBuilder::<()>::new()
            .with_hasher(HashAlgorithm::Xxh3)
            .with_hasher_opt(Some(HashAlgorithm::Blake3))
            .build();
        assert_eq!(*ring.hasher(), HashAlgorithm::Blake3);
    }

    #[test]
    fn test_custom_hasher_changes_placement() {
        let sha = RingBuilder::new().add_node("a", (), 1).build();
        let xxh = RingBuilder::new()
            .with_hasher(BuildDefault::<Xxh3Hasher>::new())
            .add_node("a", (), 1)
            .build();
        let sha_positions: Vec<_> = sha.points().iter().map(|p| p.position()).collect();
        let xxh_positions: Vec<_> = xxh.points().iter().map(|p| p.position()).collect();
        assert_ne!(sha_positions, xxh_positions);
    }

    #[test]
    fn test_add_nodes_keeps_order() {
        let ring = RingBuilder::new()
            .add_nodes(vec![("x", 'x', 1), ("y", 'y', 0), ("z", 'z', 2)])
            .build();
        assert_eq!(ring.nodes().collect::<Vec<_>>(), vec![("x", 1), ("z", 2)]);
    }
}
