//! CLI for running and talking to a shardkv cluster.
//!
//! Provides commands for:
//! - Inspecting a scratch hash ring
//! - Running a coordinator
//! - Running a storage node
//! - Issuing one-shot client requests

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
