//! Top-level CLI parsing and process setup.

use clap::Parser;

use crate::commands::Command;

#[derive(Debug, Parser)]
#[command(name = "shardkv", about = "A sharded, replicated in-memory key-value store")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Initializes logging and dispatches to the selected subcommand.
    pub fn run(self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
        self.command.run()
    }
}
