//! Mock Monero Daemon RPC - Main Application
//!
//! Serves the daemon's mining RPC methods from in-memory state until interrupted.

use clap::Parser;
use monero_rpc_mock::{
    config::{Args, Config},
    rpc::{self, RpcMethod, JSON_RPC_PATH},
    utils, ChainState, Result, APP_NAME, APP_VERSION,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let result = run(Args::parse()).await;
    if let Err(e) = &result {
        error!(category = e.category(), "Mock daemon failed: {}", e);
    }
    result
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_args(&args)?;

    if args.print_config {
        print_configuration(&config)?;
        return Ok(());
    }

    utils::init_logging(&config.logging.level, &config.logging.format);

    let addr = config.socket_addr()?;
    let state = Arc::new(ChainState::new(config.chain_state()?));

    print_banner(&config);

    rpc::serve(addr, state, shutdown_signal()).await
}

/// Log the startup banner
fn print_banner(config: &Config) {
    let methods: Vec<String> = RpcMethod::supported()
        .iter()
        .map(|m| m.as_str().to_string())
        .collect();

    info!("Starting {} v{}", APP_NAME, APP_VERSION);
    info!(
        "Port {}, initial height {}, difficulty {}",
        config.server.port, config.chain.initial_height, config.chain.difficulty
    );
    info!("Endpoint: POST {} (JSON-RPC)", JSON_RPC_PATH);
    info!("Supported methods: {}", methods.join(", "));
}

/// Print current configuration
fn print_configuration(config: &Config) -> Result<()> {
    let config_yaml = serde_yaml::to_string(config)?;
    println!("{}", config_yaml);
    Ok(())
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
