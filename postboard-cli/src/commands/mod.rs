//! Command implementations for the postboard CLI

pub mod init_db;
pub mod serve;

use std::path::PathBuf;

use clap::Args;
use postboard_server::StoreConfig;

pub use init_db::run_init_db;
pub use serve::run_serve;

/// Store options shared by every command
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to the SQLite store file (default: ~/.postboard/post.db)
    #[arg(long, env = "POSTBOARD_DB")]
    pub db: Option<PathBuf>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,
}

impl StoreArgs {
    /// Resolve flags and environment into a store config.
    pub fn to_config(&self) -> StoreConfig {
        let defaults = StoreConfig::default();
        StoreConfig {
            path: self.db.clone().unwrap_or(defaults.path),
            max_connections: self.max_connections,
        }
    }
}
