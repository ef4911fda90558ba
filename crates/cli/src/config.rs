//! Command-line configuration.

use crate::commands::Command;
use anyhow::{bail, Context};
use clap::Parser;
use ketama::{HashAlgorithm, NodeSpec, RingConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Inspect a weighted consistent hash ring.
#[derive(Debug, Parser)]
#[command(name = "ketama", version, about)]
pub struct CliConfig {
    /// JSON topology file (`{"spots": .., "hash": .., "nodes": [..]}`).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Node as `key=weight` (or bare `key` for weight 1). Repeatable.
    #[arg(short, long = "node", global = true)]
    pub nodes: Vec<NodeSpec>,

    /// Virtual points per unit of weight. Overrides the topology file.
    #[arg(short, long, global = true)]
    pub spots: Option<usize>,

    /// Hash function: sha1, xxh3, sip or blake3. Overrides the topology file.
    #[arg(long, global = true)]
    pub hash: Option<HashAlgorithm>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Sets up logging, assembles the topology and runs the subcommand.
    pub fn run(&self) -> anyhow::Result<()> {
        self.init_tracing();
        let topology = self.topology()?;
        let result = self.command.execute(&topology)?;
        print!("{result}");
        Ok(())
    }

    /// Merges the topology file with command-line overrides.
    ///
    /// Nodes given with `--node` are appended after the file's nodes.
    pub fn topology(&self) -> anyhow::Result<RingConfig> {
        let mut topology = match &self.config {
            Some(path) => RingConfig::from_file(path)
                .with_context(|| format!("loading topology from {}", path.display()))?,
            None => RingConfig::default(),
        };

        topology.nodes.extend(self.nodes.iter().cloned());
        if let Some(spots) = self.spots {
            topology.spots = spots;
        }
        if let Some(hash) = self.hash {
            topology.hash = hash;
        }

        if topology.nodes.is_empty() {
            bail!("no nodes given; use --config or --node key=weight");
        }
        topology.validate()?;

        debug!(
            nodes = topology.nodes.len(),
            spots = topology.spots,
            hash = %topology.hash,
            "assembled topology"
        );
        Ok(topology)
    }

    fn init_tracing(&self) {
        let default = match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        // Ignore the error if a subscriber is already installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
