//! Hash function abstraction for the ring.
//!
//! A ring needs a 32-bit position for every virtual point and every key. The
//! [`Hasher32`] trait exposes exactly that: absorb bytes, produce a 32-bit
//! digest, reset. [`BuildHasher32`] is the factory the ring holds on to.

pub mod algorithm;
pub mod blake3;
pub mod sha1;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use algorithm::{AnyHasher, HashAlgorithm};
pub use self::blake3::Blake3Hasher;
pub use self::sha1::Sha1Hasher;
pub use sip::{SipBuilder, SipHasher32};
pub use traits::{BuildDefault, BuildHasher32, Hasher32};
pub use xxh3::Xxh3Hasher;

/// The ketama-compatible default: SHA-1 truncated to 32 bits.
pub type DefaultHashBuilder = BuildDefault<Sha1Hasher>;
