//! XXH3 based 32-bit hash.

use crate::hash::traits::Hasher32;
use xxhash_rust::xxh3::Xxh3;

/// XXH3-64 hash state; the position is the low 32 bits of the digest.
///
/// Much faster than SHA-1 but not ketama-compatible.
pub struct Xxh3Hasher {
    inner: Xxh3,
}

impl Xxh3Hasher {
    pub fn new() -> Self {
        Self { inner: Xxh3::new() }
    }
}

impl Default for Xxh3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher32 for Xxh3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn sum32(&self) -> u32 {
        self.inner.digest() as u32
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

impl std::fmt::Debug for Xxh3Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Xxh3Hasher")
    }
}
