//! Runtime selection of a hash function.

use crate::error::Error;
use crate::hash::blake3::Blake3Hasher;
use crate::hash::sha1::Sha1Hasher;
use crate::hash::sip::SipHasher32;
use crate::hash::traits::{BuildHasher32, Hasher32};
use crate::hash::xxh3::Xxh3Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The hash functions a ring can be configured with by name.
///
/// Used where the algorithm is only known at runtime (topology files, CLI
/// flags). Code that knows its hash statically should use the concrete
/// builders instead and skip the enum dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// Ketama-compatible SHA-1 truncation.
    #[default]
    Sha1,
    Xxh3,
    /// SipHash-1-3 with zero keys.
    Sip,
    Blake3,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Xxh3,
        HashAlgorithm::Sip,
        HashAlgorithm::Blake3,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Xxh3 => "xxh3",
            HashAlgorithm::Sip => "sip",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownHashAlgorithm(s.to_owned()))
    }
}

/// Hash state for whichever [`HashAlgorithm`] was selected.
#[derive(Debug)]
pub enum AnyHasher {
    Sha1(Sha1Hasher),
    Xxh3(Xxh3Hasher),
    Sip(SipHasher32),
    Blake3(Blake3Hasher),
}

impl Hasher32 for AnyHasher {
    fn write(&mut self, bytes: &[u8]) {
        match self {
            AnyHasher::Sha1(h) => h.write(bytes),
            AnyHasher::Xxh3(h) => h.write(bytes),
            AnyHasher::Sip(h) => h.write(bytes),
            AnyHasher::Blake3(h) => h.write(bytes),
        }
    }

    fn sum32(&self) -> u32 {
        match self {
            AnyHasher::Sha1(h) => h.sum32(),
            AnyHasher::Xxh3(h) => h.sum32(),
            AnyHasher::Sip(h) => h.sum32(),
            AnyHasher::Blake3(h) => h.sum32(),
        }
    }

    fn reset(&mut self) {
        match self {
            AnyHasher::Sha1(h) => h.reset(),
            AnyHasher::Xxh3(h) => h.reset(),
            AnyHasher::Sip(h) => h.reset(),
            AnyHasher::Blake3(h) => h.reset(),
        }
    }
}

impl BuildHasher32 for HashAlgorithm {
    type Hasher = AnyHasher;

    fn build_hasher(&self) -> AnyHasher {
        match self {
            HashAlgorithm::Sha1 => AnyHasher::Sha1(Sha1Hasher::new()),
            HashAlgorithm::Xxh3 => AnyHasher::Xxh3(Xxh3Hasher::new()),
            HashAlgorithm::Sip => AnyHasher::Sip(SipHasher32::default()),
            HashAlgorithm::Blake3 => AnyHasher::Blake3(Blake3Hasher::new()),
        }
    }
}
