//! Core hash function trait definitions.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// A streaming hash state that yields a 32-bit ring position.
///
/// This is the capability the ring needs from a hash function: absorb bytes,
/// produce a 32-bit digest, and start over. Implementations typically wrap a
/// wider digest and truncate it.
pub trait Hasher32 {
    /// Absorbs `bytes` into the state.
    fn write(&mut self, bytes: &[u8]);

    /// Returns the 32-bit digest of everything written since the last reset.
    ///
    /// Does not consume or reset the state.
    fn sum32(&self) -> u32;

    /// Returns the state to its initial value.
    fn reset(&mut self);
}

/// A factory for [`Hasher32`] states.
///
/// The ring keeps one builder and asks it for a fresh state whenever it needs
/// to hash something. Builders are shared by every reader of a ring, so they
/// must be thread-safe.
pub trait BuildHasher32: Send + Sync {
    /// The hash state produced by this builder.
    type Hasher: Hasher32;

    /// Creates a fresh hash state.
    fn build_hasher(&self) -> Self::Hasher;

    /// Hashes a single byte string in one go.
    fn hash_one(&self, bytes: &[u8]) -> u32 {
        let mut hasher = self.build_hasher();
        hasher.write(bytes);
        hasher.sum32()
    }
}

/// Builder for any [`Hasher32`] that can be created with [`Default`].
pub struct BuildDefault<H>(PhantomData<fn() -> H>);

impl<H> BuildDefault<H> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<H: Hasher32 + Default> BuildHasher32 for BuildDefault<H> {
    type Hasher = H;

    fn build_hasher(&self) -> H {
        H::default()
    }
}

impl<H> Default for BuildDefault<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Clone for BuildDefault<H> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<H> Copy for BuildDefault<H> {}

impl<H> Debug for BuildDefault<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BuildDefault")
    }
}
