//! SHA-1 based 32-bit hash, the ketama default.

use crate::hash::traits::Hasher32;
use ::sha1::{Digest, Sha1};

/// SHA-1 hash state producing ketama-compatible 32-bit positions.
///
/// The 160-bit digest is truncated to its last four bytes, read big-endian:
/// byte 19 is the least significant, byte 16 the most significant. Changing
/// this breaks placement agreement with every other ketama implementation.
#[derive(Clone, Default)]
pub struct Sha1Hasher {
    inner: Sha1,
}

impl Sha1Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hasher32 for Sha1Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn sum32(&self) -> u32 {
        let digest = self.inner.clone().finalize();
        u32::from_be_bytes([digest[16], digest[17], digest[18], digest[19]])
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }
}

impl std::fmt::Debug for Sha1Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Sha1Hasher")
    }
}
