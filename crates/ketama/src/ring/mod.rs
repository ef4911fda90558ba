//! Consistent hash ring implementation.
//!
//! The ring keeps its virtual points in a sorted `Vec` and resolves keys with
//! a binary search. It is built once and then only read; changing membership
//! means building a new ring.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod ring;
pub mod topology;

pub use builder::RingBuilder;
pub use ring::{normalize_spots, HashRing, DEFAULT_SPOTS};
pub use topology::{Ownership, RING_SIZE};
