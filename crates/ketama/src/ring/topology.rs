//! Key-space ownership per node.
//!
//! The point at position `p` owns the arc `(previous point, p]`; the first
//! point also owns the arc that wraps past `u32::MAX`. Summing arcs per node
//! gives the fraction of uniformly distributed keys each node receives.

use crate::point::{Position, VirtualPoint};
use crate::ring::HashRing;
use std::collections::HashMap;
use std::sync::Arc;

/// Number of distinct positions on the ring.
pub const RING_SIZE: u64 = 1 << 32;

/// The slice of the key space owned by one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ownership {
    /// Node key.
    pub key: Arc<str>,
    /// Virtual points the node has on the ring.
    pub points: usize,
    /// Positions owned, out of [`RING_SIZE`].
    pub span: u64,
}

impl Ownership {
    /// Owned fraction of the key space, in `[0, 1]`.
    pub fn share(&self) -> f64 {
        self.span as f64 / RING_SIZE as f64
    }
}

impl<T, S> HashRing<T, S> {
    /// Computes each node's share of the key space, sorted by key.
    ///
    /// Works on unprepared rings too, at the cost of sorting a copy.
    pub fn ownership(&self) -> Vec<Ownership> {
        let mut ordered: Vec<&VirtualPoint<T>> = self.points().iter().collect();
        if !self.is_prepared() {
            ordered.sort_by_key(|p| p.position());
        }

        let Some(last) = ordered.last().map(|p| p.position()) else {
            return Vec::new();
        };

        let mut by_key: HashMap<&str, Ownership> = HashMap::new();
        let mut previous: Option<Position> = None;

        for point in ordered {
            let position = point.position();
            let span = match previous {
                Some(prev) => prev.distance_to(&position),
                // Wrapping arc; a full turn when every point shares a position.
                None => RING_SIZE - u64::from(last.0) + u64::from(position.0),
            };
            previous = Some(position);

            let entry = by_key.entry(point.key()).or_insert_with(|| Ownership {
                key: Arc::clone(point.shared_key()),
                points: 0,
                span: 0,
            });
            entry.points += 1;
            entry.span += span;
        }

        let mut owners: Vec<Ownership> = by_key.into_values().collect();
        owners.sort_by(|a, b| a.key.cmp(&b.key));
        owners
    }
}
