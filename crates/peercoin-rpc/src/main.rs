mod cli;
mod config;

use clap::Parser;
use eyre::{bail, eyre, WrapErr};
use serde_json::value::RawValue;

use peercoin_rpc_core::rpc::{ChainInfo, HttpRpcClient, PeercoinRpc};
use peercoin_rpc_core::{CoreError, RpcError};

const DEFAULT_METHOD: &str = "getblockchaininfo";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let config = config::Config::load(&args.config).wrap_err("load configuration")?;
    let rpc = HttpRpcClient::new(&config.host, config.port, &config.username, &config.password)
        .wrap_err("build RPC client")?;

    if args.method == DEFAULT_METHOD && args.params.is_none() {
        let info = rpc
            .get_blockchain_info()
            .await
            .map_err(|err| eyre!(format_rpc_error(rpc.endpoint(), &err)))
            .wrap_err("while calling getblockchaininfo")?;
        report_chain_info(&info, config.testnet);
        println!("{info:#?}");
        return Ok(());
    }

    let params = args.params.as_deref().map(parse_params).transpose()?;
    let raw = rpc
        .call(&args.method, params.as_deref())
        .await
        .map_err(|err| eyre!(format_rpc_error(rpc.endpoint(), &err)))
        .wrap_err_with(|| format!("while calling {}", args.method))?;
    println!("{}", raw.get());

    Ok(())
}

fn report_chain_info(info: &ChainInfo, expect_testnet: bool) {
    tracing::info!(
        chain = %info.chain,
        blocks = info.blocks,
        best_block_hash = %info.best_block_hash,
        "connected to Peercoin node"
    );
    tracing::info!(
        chainwork = info.chainwork.as_deref().unwrap_or("unknown"),
        "chain work"
    );
    if is_test_chain(&info.chain) != expect_testnet {
        tracing::warn!(
            chain = %info.chain,
            config_testnet = expect_testnet,
            "node chain does not match the Testnet setting in the config file"
        );
    }
    if info.initial_block_download == Some(true) {
        tracing::warn!("node is still in initial block download; results may be stale");
    }
}

fn is_test_chain(chain: &str) -> bool {
    chain != "main"
}

/// Validate `--params` as a JSON array or object and keep it as raw JSON.
fn parse_params(text: &str) -> eyre::Result<Box<RawValue>> {
    let raw: Box<RawValue> = serde_json::from_str(text).wrap_err("parse --params as JSON")?;
    if !raw.get().starts_with(['[', '{']) {
        bail!("--params must be a JSON array or object, got `{}`", raw.get());
    }
    Ok(raw)
}

fn format_rpc_error(endpoint: &str, err: &CoreError) -> String {
    let mut lines = vec![
        format!("RPC call to `{endpoint}` failed"),
        format!("RPC error: {err}"),
    ];

    let CoreError::Rpc(rpc_err) = err else {
        return lines.join("\n");
    };
    match rpc_err {
        RpcError::Transport(source) if source.is_connect() => lines.push(
            "hint: connection failed; verify Host/Port in the config and that the node is running with -server"
                .into(),
        ),
        RpcError::Transport(source) if source.is_timeout() => {
            lines.push("hint: request timed out; the node may be busy or unreachable".into())
        }
        RpcError::HttpStatus {
            status: 401 | 403, ..
        } => {
            lines.push(format!(
                "hint: authentication failed; verify Username/Password or {} / {}",
                config::USERNAME_ENV,
                config::PASSWORD_ENV
            ))
        }
        RpcError::HttpStatus { status: 404, .. } => {
            lines.push("hint: endpoint not found; verify the node's rpcport".into())
        }
        RpcError::Server { code: -28, .. } => {
            lines.push("hint: node is still warming up; retry in a moment".into())
        }
        RpcError::Server { code: -32601, .. } => {
            lines.push("hint: method not supported by this node version".into())
        }
        _ => {}
    }

    lines.join("\n")
}
