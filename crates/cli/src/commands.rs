//! Subcommands and their results.

use anyhow::ensure;
use clap::Subcommand;
use ketama::{HashAlgorithm, HashRing, Position, RingConfig};
use std::collections::HashMap;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the node owning each key.
    Locate {
        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Hash generated keys and compare each node's share with its weight.
    Distribution {
        /// Number of keys to sample.
        #[arg(long, default_value_t = 1_000_000)]
        samples: u64,
        /// Sampled keys are `{prefix}{i}`.
        #[arg(long, default_value = "test value")]
        prefix: String,
    },
    /// Print each node's exact share of the key space.
    Ownership,
}

/// Where a key landed.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub key: String,
    pub node: String,
    pub hash: Position,
    pub point: Position,
}

/// One node's row in a share report.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRow {
    pub node: String,
    /// Sampled keys (distribution) or virtual points (ownership).
    pub count: u64,
    pub observed: f64,
    pub expected: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Located(Vec<Location>),
    Distribution { samples: u64, rows: Vec<ShareRow> },
    Ownership(Vec<ShareRow>),
}

impl Command {
    pub fn execute(&self, topology: &RingConfig) -> anyhow::Result<CommandResult> {
        let ring = topology.build_ring();
        ensure!(!ring.is_empty(), "every node has weight 0, the ring is empty");
        info!(
            nodes = ring.node_count(),
            points = ring.len(),
            hash = %topology.hash,
            "built ring"
        );

        match self {
            Command::Locate { keys } => Ok(CommandResult::Located(locate(&ring, keys))),
            Command::Distribution { samples, prefix } => {
                ensure!(*samples > 0, "--samples must be positive");
                Ok(CommandResult::Distribution {
                    samples: *samples,
                    rows: distribution(&ring, topology, *samples, prefix),
                })
            }
            Command::Ownership => Ok(CommandResult::Ownership(ownership(&ring, topology))),
        }
    }
}

fn locate(ring: &HashRing<String, HashAlgorithm>, keys: &[String]) -> Vec<Location> {
    keys.iter()
        .filter_map(|key| {
            ring.locate(key).map(|point| Location {
                key: key.clone(),
                node: point.value().clone(),
                hash: ring.hash_key(key),
                point: point.position(),
            })
        })
        .collect()
}

/// Expected share per node key, from configured weights.
fn weight_shares(topology: &RingConfig) -> HashMap<&str, f64> {
    let total = topology.total_weight() as f64;
    let mut shares = HashMap::new();
    for node in &topology.nodes {
        *shares.entry(node.key.as_str()).or_insert(0.0) += f64::from(node.weight) / total;
    }
    shares
}

fn rows_from_counts(counts: HashMap<String, u64>, total: u64, topology: &RingConfig) -> Vec<ShareRow> {
    let expected = weight_shares(topology);
    let mut rows: Vec<ShareRow> = expected
        .iter()
        .map(|(node, share)| {
            let count = counts.get(*node).copied().unwrap_or(0);
            ShareRow {
                node: node.to_string(),
                count,
                observed: count as f64 / total as f64,
                expected: *share,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.node.cmp(&b.node));
    rows
}

fn distribution(
    ring: &HashRing<String, HashAlgorithm>,
    topology: &RingConfig,
    samples: u64,
    prefix: &str,
) -> Vec<ShareRow> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut key = String::with_capacity(prefix.len() + 20);
    for i in 0..samples {
        key.clear();
        key.push_str(prefix);
        key.push_str(&i.to_string());
        if let Some(node) = ring.lookup(&key) {
            *counts.entry(node.clone()).or_default() += 1;
        }
    }
    rows_from_counts(counts, samples, topology)
}

fn ownership(ring: &HashRing<String, HashAlgorithm>, topology: &RingConfig) -> Vec<ShareRow> {
    let expected = weight_shares(topology);
    let mut rows: Vec<ShareRow> = ring
        .ownership()
        .into_iter()
        .map(|owner| ShareRow {
            node: owner.key.to_string(),
            count: owner.points as u64,
            observed: owner.share(),
            expected: expected.get(&*owner.key).copied().unwrap_or(0.0),
        })
        .collect();
    rows.sort_by(|a, b| a.node.cmp(&b.node));
    rows
}

fn write_rows(f: &mut fmt::Formatter<'_>, label: &str, rows: &[ShareRow]) -> fmt::Result {
    writeln!(
        f,
        "{:<24} {:>10} {:>9} {:>9} {:>8}",
        "node", label, "observed", "expected", "error"
    )?;
    for row in rows {
        let error = if row.expected > 0.0 {
            (row.observed - row.expected) / row.expected * 100.0
        } else {
            0.0
        };
        writeln!(
            f,
            "{:<24} {:>10} {:>8.3}% {:>8.3}% {:>+7.2}%",
            row.node,
            row.count,
            row.observed * 100.0,
            row.expected * 100.0,
            error
        )?;
    }
    Ok(())
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Located(locations) => {
                for loc in locations {
                    writeln!(f, "{} -> {} (hash {}, point {})", loc.key, loc.node, loc.hash, loc.point)?;
                }
                Ok(())
            }
            CommandResult::Distribution { samples, rows } => {
                writeln!(f, "{samples} sampled keys")?;
                write_rows(f, "keys", rows)
            }
            CommandResult::Ownership(rows) => write_rows(f, "points", rows),
        }
    }
}
