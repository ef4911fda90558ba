//! BLAKE3 based 32-bit hash.

use crate::hash::traits::Hasher32;

/// BLAKE3 hash state, truncated like [`Sha1Hasher`](crate::hash::Sha1Hasher):
/// the last four bytes of the 256-bit digest, read big-endian.
#[derive(Clone, Default)]
pub struct Blake3Hasher {
    inner: ::blake3::Hasher,
}

impl Blake3Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hasher32 for Blake3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn sum32(&self) -> u32 {
        let hash = self.inner.finalize();
        let bytes = hash.as_bytes();
        u32::from_be_bytes([bytes[28], bytes[29], bytes[30], bytes[31]])
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

impl std::fmt::Debug for Blake3Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Blake3Hasher")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_four_bytes() {
        let expected = ::blake3::hash(b"node-a:0");
        let tail = &expected.as_bytes()[28..];
        let mut hasher = Blake3Hasher::new();
        hasher.write(b"node-a:0");
        assert_eq!(
            hasher.sum32(),
            u32::from_be_bytes([tail[0], tail[1], tail[2], tail[3]])
        );
    }
}
