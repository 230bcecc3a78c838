//! HTTP server command
//!
//! Opens the store, ensures the schema, and serves until Ctrl+C/SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use postboard_server::http::{run_server, ServerConfig};

use super::StoreArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "POSTBOARD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = args.store.to_config();
    tracing::info!("Starting postboard on {} (store: {})", args.bind, store.path.display());

    let pool = store
        .open()
        .await
        .with_context(|| format!("Failed to open store at {}", store.path.display()))?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
