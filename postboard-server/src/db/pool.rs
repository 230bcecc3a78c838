//! Database connection pool management
//!
//! Uses a sqlx `SqlitePool` over a single store file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use super::{ensure_schema, DbError};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on a locked store before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Store file name used when no path is configured
const DEFAULT_DB_FILE: &str = "post.db";

/// Store location and pool sizing
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let path = dirs::home_dir()
            .map(|home| home.join(".postboard").join(DEFAULT_DB_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));
        Self {
            path,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl StoreConfig {
    /// Open the pool described by this config.
    pub async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
        create_pool_with_options(&self.path, self.max_connections).await
    }

    /// Open the pool and make sure the tables exist.
    pub async fn open(&self) -> Result<SqlitePool, DbError> {
        let pool = self.connect().await.map_err(DbError::Read)?;
        ensure_schema(&pool).await?;
        tracing::info!(path = %self.path.display(), "store ready");
        Ok(pool)
    }
}

/// Create a SQLite connection pool, creating the store file if missing.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// store cannot be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Path::new("post.db")).await?;
/// ```
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(path, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// Foreign keys stay declaration-only: comments may point at posts that
/// do not exist, and deleting a post leaves its comments behind.
pub async fn create_pool_with_options(
    path: &Path,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(false);

    tracing::debug!(path = %path.display(), max_connections, "opening store");

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pool_acquires_connection() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&dir.path().join("post.db"))
            .await
            .expect("pool creation failed");

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("post.db");

        let config = StoreConfig {
            path: path.clone(),
            max_connections: 2,
        };
        config.connect().await.expect("pool creation failed");

        assert!(path.exists());
    }

    #[tokio::test]
    async fn open_bootstraps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            path: dir.path().join("post.db"),
            max_connections: 2,
        };

        let pool = config.open().await.expect("open failed");
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('posts', 'comments')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 2);

        // Reopening an existing store is fine
        pool.close().await;
        config.open().await.expect("reopen failed");
    }

    #[tokio::test]
    async fn foreign_keys_are_not_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&dir.path().join("post.db")).await.unwrap();

        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 0);
    }

    #[tokio::test]
    async fn concurrent_pool_access() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&dir.path().join("post.db")).await.unwrap();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i64,) = sqlx::query_as("SELECT ?")
                        .bind(i as i64)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i64);
        }
    }
}
