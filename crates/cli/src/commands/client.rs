//! `shardkv client` — issue a single request against a coordinator.

use clap::{Args, Subcommand};
use client::KvClient;

#[derive(Debug, Args)]
pub struct ClientArgs {
    /// Coordinator host to connect to.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Coordinator port to connect to.
    #[arg(long, default_value_t = 9000)]
    pub port: u16,

    #[command(subcommand)]
    pub op: ClientOp,
}

#[derive(Debug, Subcommand)]
pub enum ClientOp {
    /// Store a value (parsed as JSON; bare strings are quoted automatically).
    Set { key: String, value: String },
    /// Fetch a value.
    Get { key: String },
    /// Delete a key.
    Delete { key: String },
    /// Check cluster health.
    Health,
}

pub fn run(args: ClientArgs) -> super::CommandResult {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let kv_client = KvClient::new(&args.host, args.port);
        match args.op {
            ClientOp::Set { key, value } => {
                let value = parse_value(&value);
                let success = kv_client.set(&key, value).await;
                println!("{}", serde_json::json!({ "success": success }));
            }
            ClientOp::Get { key } => {
                let value = kv_client.get(&key).await;
                println!("{}", serde_json::json!({ "value": value }));
            }
            ClientOp::Delete { key } => {
                let success = kv_client.delete(&key).await;
                println!("{}", serde_json::json!({ "success": success }));
            }
            ClientOp::Health => {
                let response = kv_client.health().await;
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
        }
        Ok(())
    })
}

/// Accepts either valid JSON (`42`, `{"a":1}`, `"quoted"`) or a bare string,
/// which is wrapped as a JSON string for convenience on the command line.
fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}
