use std::path::PathBuf;

use clap::Parser;

/// Query a Peercoin node over JSON-RPC.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to the JSON config file with host, port and credentials.
    #[arg(long, default_value = "config.json", env = "PEERCOIN_RPC_CONFIG")]
    pub config: PathBuf,

    /// RPC method to call.
    #[arg(long, default_value = "getblockchaininfo")]
    pub method: String,

    /// Positional or named parameters as a JSON array or object.
    #[arg(long)]
    pub params: Option<String>,
}
