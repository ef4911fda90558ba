//! Virtual point abstractions.
//!
//! # Virtual Points
//!
//! Each physical node is represented on the ring by many points instead of a
//! single one. A node added with weight `w` on a ring configured with `s`
//! spots gets `s * w` points, so its share of the key space grows with its
//! weight and its keys are spread across the whole ring.
//!
//! Point `i` of node `key` sits at `hash(key + ":" + i)`. This derivation is
//! shared with every ketama implementation; do not change it.
//!
//! # Performance Characteristics
//!
//! - **Memory**: one `VirtualPoint` per point; the key string is shared
//! - **Lookup**: O(log n) where n = total points

use crate::hash::{BuildHasher32, Hasher32};
use std::fmt;
use std::sync::Arc;

/// A 32-bit position on the ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Position(pub u32);

impl Position {
    pub const MIN: Position = Position(0);
    pub const MAX: Position = Position(u32::MAX);

    /// Hashes an arbitrary key onto the ring.
    pub fn of<S: BuildHasher32 + ?Sized>(builder: &S, key: &[u8]) -> Self {
        Position(builder.hash_one(key))
    }

    /// Clockwise distance from `self` to `other`, as a count of positions.
    ///
    /// Returned as `u64` so that a full turn (`2^32`) is representable; two
    /// equal positions are `0` apart.
    pub fn distance_to(&self, other: &Self) -> u64 {
        if other.0 >= self.0 {
            u64::from(other.0 - self.0)
        } else {
            (1u64 << 32) - u64::from(self.0) + u64::from(other.0)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Position(value)
    }
}

/// One replica of a node placed on the ring.
///
/// All points of a node share the same `key` allocation and carry a clone of
/// the node's value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VirtualPoint<T> {
    key: Arc<str>,
    value: T,
    position: Position,
}

impl<T> VirtualPoint<T> {
    #[inline]
    pub fn new(key: Arc<str>, value: T, position: Position) -> Self {
        Self {
            key,
            value,
            position,
        }
    }

    /// The owning node's identifier.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The shared identifier, cheap to clone.
    #[inline]
    pub fn shared_key(&self) -> &Arc<str> {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for VirtualPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Computes the positions of the points a node owns, in index order.
///
/// One hash state is reused for every point and reset between them, so each
/// position depends only on its own `key:index` input.
pub fn point_positions<S>(builder: &S, key: &str, count: usize) -> Vec<Position>
where
    S: BuildHasher32 + ?Sized,
{
    let mut hasher = builder.build_hasher();
    let mut input = String::with_capacity(key.len() + 11);
    let mut positions = Vec::with_capacity(count);

    for index in 0..count {
        input.clear();
        input.push_str(key);
        input.push(':');
        input.push_str(&index.to_string());

        hasher.write(input.as_bytes());
        positions.push(Position(hasher.sum32()));
        hasher.reset();
    }

    positions
}
