//! Topology configuration.
//!
//! A ring can be described by a small JSON document:
//!
//! ```json
//! {
//!   "spots": 160,
//!   "hash": "sha1",
//!   "nodes": [
//!     { "key": "10.0.0.1:11211", "weight": 1 },
//!     { "key": "10.0.0.2:11211", "weight": 2 }
//!   ]
//! }
//! ```
//!
//! Every field except `nodes` is optional. Nodes can also be written in the
//! compact `key=weight` form accepted by [`NodeSpec::from_str`].

use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::ring::{HashRing, DEFAULT_SPOTS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

fn default_spots() -> usize {
    DEFAULT_SPOTS
}

fn default_weight() -> u32 {
    1
}

/// One node of a topology.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub key: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl NodeSpec {
    pub fn new(key: impl Into<String>, weight: u32) -> Self {
        Self {
            key: key.into(),
            weight,
        }
    }
}

impl FromStr for NodeSpec {
    type Err = Error;

    /// Parses `key=weight`, or a bare `key` with weight 1.
    ///
    /// The split is on the last `=`, so keys may contain `=` themselves when a
    /// weight is given.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidNodeSpec {
            spec: s.to_owned(),
            reason: reason.to_owned(),
        };

        let (key, weight) = match s.rsplit_once('=') {
            Some((key, weight)) => {
                let weight = weight
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| invalid(&format!("bad weight: {e}")))?;
                (key.trim(), weight)
            }
            None => (s.trim(), default_weight()),
        };

        if key.is_empty() {
            return Err(invalid("empty key"));
        }
        Ok(NodeSpec::new(key, weight))
    }
}

impl fmt::Display for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.weight)
    }
}

/// A complete ring description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Virtual points per unit of weight; zero means the default.
    #[serde(default = "default_spots")]
    pub spots: usize,
    #[serde(default)]
    pub hash: HashAlgorithm,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            spots: DEFAULT_SPOTS,
            hash: HashAlgorithm::default(),
            nodes: Vec::new(),
        }
    }
}

impl RingConfig {
    /// Parses and validates a JSON topology.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON topology file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), nodes = config.nodes.len(), "loaded ring config");
        Ok(config)
    }

    /// Rejects nodes with an empty key.
    pub fn validate(&self) -> Result<()> {
        if let Some(node) = self.nodes.iter().find(|n| n.key.trim().is_empty()) {
            return Err(Error::InvalidNodeSpec {
                spec: node.to_string(),
                reason: "empty key".to_owned(),
            });
        }
        Ok(())
    }

    /// Sum of all node weights.
    pub fn total_weight(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.weight)).sum()
    }

    /// Builds a prepared ring whose values are the node keys.
    pub fn build_ring(&self) -> HashRing<String, HashAlgorithm> {
        self.build_ring_with(|node| node.key.clone())
    }

    /// Builds a prepared ring, deriving each node's value with `value`.
    pub fn build_ring_with<T, F>(&self, mut value: F) -> HashRing<T, HashAlgorithm>
    where
        T: Clone,
        F: FnMut(&NodeSpec) -> T,
    {
        let mut ring = HashRing::with_spots_and_hasher(self.spots, self.hash);
        for node in &self.nodes {
            ring.add(&node.key, value(node), node.weight);
        }
        ring.prepare();
        ring
    }
}
