//! Hash ring data structure.

use crate::hash::{BuildHasher32, DefaultHashBuilder};
use crate::point::{point_positions, Position, VirtualPoint};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Virtual points per unit of weight when none (or zero) is configured.
pub const DEFAULT_SPOTS: usize = 4;

/// Replaces a zero spot count with [`DEFAULT_SPOTS`].
#[inline]
pub fn normalize_spots(spots: usize) -> usize {
    if spots == 0 {
        DEFAULT_SPOTS
    } else {
        spots
    }
}

/// Weighted consistent hash ring.
///
/// Nodes are registered with [`add`](Self::add), the ring is sorted once with
/// [`prepare`](Self::prepare), and keys are then resolved with
/// [`get`](Self::get), [`lookup`](Self::lookup) or [`locate`](Self::locate).
/// A key belongs to the first point at or after its hash, wrapping around to
/// the first point of the ring.
///
/// There is no removal: to change membership, build a new ring and publish it
/// (see [`SharedRing`](crate::SharedRing)).
///
/// # Example
///
/// ```rust
/// use ketama::HashRing;
///
/// let mut ring = HashRing::with_spots(160);
/// ring.add("cache-1:11211", "cache-1", 1);
/// ring.add("cache-2:11211", "cache-2", 2);
/// ring.prepare();
///
/// let owner = ring.get("user:42");
/// assert!(owner == "cache-1" || owner == "cache-2");
/// ```
#[derive(Clone)]
pub struct HashRing<T, S = DefaultHashBuilder> {
    points: Vec<VirtualPoint<T>>,
    /// Registration log: key and weight of every placed node.
    nodes: Vec<(Arc<str>, u32)>,
    spots: usize,
    hasher: S,
    /// Point count recorded by the last `prepare`.
    length: usize,
    prepared: bool,
}

impl<T> HashRing<T, DefaultHashBuilder> {
    /// Creates an empty ring with the default spots and the SHA-1 hash.
    pub fn new() -> Self {
        Self::with_spots_and_hasher(DEFAULT_SPOTS, DefaultHashBuilder::default())
    }

    /// Creates an empty ring with `spots` points per unit of weight.
    pub fn with_spots(spots: usize) -> Self {
        Self::with_spots_and_hasher(spots, DefaultHashBuilder::default())
    }
}

impl<T> Default for HashRing<T, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: BuildHasher32> HashRing<T, S> {
    /// Creates an empty ring with the default spots and a custom hash.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_spots_and_hasher(DEFAULT_SPOTS, hasher)
    }

    /// Creates an empty ring. A `spots` of zero falls back to [`DEFAULT_SPOTS`].
    pub fn with_spots_and_hasher(spots: usize, hasher: S) -> Self {
        Self {
            points: Vec::new(),
            nodes: Vec::new(),
            spots: normalize_spots(spots),
            hasher,
            length: 0,
            prepared: true,
        }
    }

    /// Registers a node with `spots * weight` virtual points.
    ///
    /// A weight of zero adds nothing. Keys are not checked for uniqueness;
    /// adding the same key twice simply doubles its points. The ring must be
    /// [`prepare`](Self::prepare)d again before the next lookup.
    pub fn add(&mut self, key: &str, value: T, weight: u32)
    where
        T: Clone,
    {
        let count = self.spots.saturating_mul(weight as usize);
        if count == 0 {
            debug!(key, "zero weight, node not placed on ring");
            return;
        }

        let shared: Arc<str> = Arc::from(key);
        let positions = point_positions(&self.hasher, key, count);

        self.points.reserve(count);
        for position in positions {
            self.points
                .push(VirtualPoint::new(Arc::clone(&shared), value.clone(), position));
        }
        self.nodes.push((shared, weight));
        self.prepared = false;

        debug!(key, weight, points = count, "added node to ring");
    }

    /// Sorts the points so the ring can answer lookups.
    ///
    /// The sort is stable: points sharing a position stay in insertion order.
    /// Calling it again without intervening adds is harmless.
    pub fn prepare(&mut self) {
        self.points.sort_by_key(VirtualPoint::position);
        self.length = self.points.len();
        self.prepared = true;

        debug!(points = self.length, "prepared ring");
    }

    /// Resolves `key` to its owner's value, or `T::default()` on an empty ring.
    ///
    /// The default is indistinguishable from a stored default value; use
    /// [`lookup`](Self::lookup) when that matters.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> T
    where
        T: Clone + Default,
    {
        self.lookup(key).cloned().unwrap_or_default()
    }

    /// Resolves `key` to its owner's value. `None` only if the ring is empty.
    pub fn lookup<K: AsRef<[u8]>>(&self, key: K) -> Option<&T> {
        self.locate(key).map(VirtualPoint::value)
    }

    /// Resolves `key` to the virtual point that owns it.
    ///
    /// Lookups on a ring that was modified after the last `prepare` are a
    /// caller bug. They are still answered correctly, with a linear scan, and
    /// a warning is logged.
    pub fn locate<K: AsRef<[u8]>>(&self, key: K) -> Option<&VirtualPoint<T>> {
        if self.points.is_empty() {
            return None;
        }

        let target = self.hash_key(key);

        if !self.prepared {
            warn!(
                points = self.points.len(),
                "lookup on unprepared ring, call prepare() after adding nodes"
            );
            return self.scan_successor(target);
        }

        let sorted = &self.points[..self.length];
        let mut index = sorted.partition_point(|p| p.position() < target);
        if index == self.length {
            index = 0;
        }
        sorted.get(index)
    }

    /// Successor search over unsorted points.
    ///
    /// Picks the same point a sorted ring would: the lowest position at or
    /// after `target`, else the lowest position overall, earliest-added on ties.
    fn scan_successor(&self, target: Position) -> Option<&VirtualPoint<T>> {
        let mut successor: Option<&VirtualPoint<T>> = None;
        let mut first: Option<&VirtualPoint<T>> = None;

        for point in &self.points {
            let position = point.position();
            if position >= target && successor.map_or(true, |s| position < s.position()) {
                successor = Some(point);
            }
            if first.map_or(true, |f| position < f.position()) {
                first = Some(point);
            }
        }

        successor.or(first)
    }

    /// Hashes a key onto the ring with this ring's hash function.
    pub fn hash_key<K: AsRef<[u8]>>(&self, key: K) -> Position {
        Position::of(&self.hasher, key.as_ref())
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<T, S> HashRing<T, S> {
    /// Total number of virtual points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no node has been placed on the ring.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// False if nodes were added since the last `prepare`.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Virtual points per unit of weight.
    pub fn spots(&self) -> usize {
        self.spots
    }

    /// The virtual points, in ring order once prepared.
    pub fn points(&self) -> &[VirtualPoint<T>] {
        &self.points
    }

    /// Registered nodes as `(key, weight)`, in the order they were added.
    ///
    /// Zero-weight nodes are not listed; a key added twice appears twice.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.nodes.iter().map(|(key, weight)| (&**key, *weight))
    }

    /// Number of distinct node keys on the ring.
    pub fn node_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|(key, _)| &**key)
            .collect::<HashSet<&str>>()
            .len()
    }
}

impl<T, S> fmt::Debug for HashRing<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("spots", &self.spots)
            .field("nodes", &self.nodes.len())
            .field("points", &self.points.len())
            .field("prepared", &self.prepared)
            .finish()
    }
}
