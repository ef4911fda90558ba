//! Weighted consistent hashing on a ketama continuum.
//!
//! This crate provides:
//! - [`HashRing`]: virtual points per node proportional to weight, a sorted
//!   ring, and nearest-successor lookup
//! - Pluggable 32-bit hash functions ([`hash`]), defaulting to the
//!   ketama-compatible SHA-1 truncation
//! - [`SharedRing`] for publishing rebuilt rings to concurrent readers
//! - [`RingConfig`] for describing a topology in JSON
//!
//! ```rust
//! use ketama::HashRing;
//!
//! let mut ring = HashRing::with_spots(200);
//! ring.add("test1.server.com", "test1.server.com", 1);
//! ring.add("test4.server.com", "test4.server.com", 5);
//! ring.prepare();
//!
//! assert_eq!(ring.get("foo"), "test4.server.com");
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod point;
pub mod ring;
pub mod shared;

pub use config::{NodeSpec, RingConfig};
pub use error::{Error, Result};
pub use hash::{BuildHasher32, DefaultHashBuilder, HashAlgorithm, Hasher32};
pub use point::{Position, VirtualPoint};
pub use ring::{HashRing, Ownership, RingBuilder, DEFAULT_SPOTS};
pub use shared::SharedRing;
