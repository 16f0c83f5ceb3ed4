//! CLI subcommands.
//!
//! `ring` inspects a scratch hash ring (the teacher's original intent for
//! this crate); `coordinator`/`node`/`client` are the bootstrapper surface
//! needed to actually run a cluster — the Rust analogue of
//! `original_source/{start_cluster,main}.py`, scaled down to flag parsing.

pub mod client;
pub mod coordinator;
pub mod node;
pub mod ring;

use clap::Subcommand;

pub type CommandResult = anyhow::Result<()>;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a scratch ring and print its ownership breakdown.
    Ring(ring::RingArgs),
    /// Run a coordinator, listening for client and node traffic.
    Coordinator(coordinator::CoordinatorArgs),
    /// Run a storage node.
    Node(node::NodeArgs),
    /// Issue a single SET/GET/DELETE/HEALTH call against a coordinator.
    Client(client::ClientArgs),
}

impl Command {
    pub fn run(self) -> CommandResult {
        match self {
            Command::Ring(args) => ring::run(args),
            Command::Coordinator(args) => coordinator::run(args),
            Command::Node(args) => node::run(args),
            Command::Client(args) => client::run(args),
        }
    }
}
