//! Store bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use super::StoreArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Create the store file and tables if missing. Safe to repeat.
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let store = args.store.to_config();
    let pool = store
        .open()
        .await
        .with_context(|| format!("Failed to initialize store at {}", store.path.display()))?;
    pool.close().await;

    println!("store ready: {}", store.path.display());
    Ok(())
}
