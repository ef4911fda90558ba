//! CLI tool for inspecting ketama hash rings.
//!
//! Provides commands for:
//! - Locating the owner of keys
//! - Sampling key distribution against node weights
//! - Reporting each node's share of the key space

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
