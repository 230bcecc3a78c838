//! postboard CLI - runs the post/comment HTTP service
//!
//! - `serve`: open the store, ensure the schema, serve HTTP until shutdown
//! - `init-db`: create the store file and tables, then exit

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "postboard",
    author,
    version,
    about = "Small post and comment service backed by a single SQLite file"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the store file and tables if they do not exist
    InitDb(commands::init_db::InitDbArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env-backed flags; a missing file is fine
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }

    Ok(())
}
