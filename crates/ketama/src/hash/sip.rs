//! SipHash-1-3 based 32-bit hash.

use crate::hash::traits::{BuildHasher32, Hasher32};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 hash state; the position is the low 32 bits of the digest.
///
/// Keyed, so two rings built with different keys place nodes differently.
#[derive(Clone, Debug)]
pub struct SipHasher32 {
    k0: u64,
    k1: u64,
    inner: SipHasher13,
}

impl SipHasher32 {
    pub fn new_with_keys(k0: u64, k1: u64) -> Self {
        Self {
            k0,
            k1,
            inner: SipHasher13::new_with_keys(k0, k1),
        }
    }
}

impl Default for SipHasher32 {
    fn default() -> Self {
        Self::new_with_keys(0, 0)
    }
}

impl Hasher32 for SipHasher32 {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.write(bytes);
    }

    fn sum32(&self) -> u32 {
        self.inner.finish() as u32
    }

    fn reset(&mut self) {
        self.inner = SipHasher13::new_with_keys(self.k0, self.k1);
    }
}

/// Builder for keyed [`SipHasher32`] states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SipBuilder {
    k0: u64,
    k1: u64,
}

impl SipBuilder {
    pub fn new_with_keys(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }
}

impl BuildHasher32 for SipBuilder {
    type Hasher = SipHasher32;

    fn build_hasher(&self) -> SipHasher32 {
        SipHasher32::new_with_keys(self.k0, self.k1)
    }
}
