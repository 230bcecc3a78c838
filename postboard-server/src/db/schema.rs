//! Schema bootstrap for the post store
//!
//! Creation is idempotent. Existing tables are never altered, so a store
//! with a different shape is left as-is.

use sqlx::SqlitePool;

use super::DbError;

const CREATE_POSTS: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(255),
        content TEXT,
        author VARCHAR(100),
        createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
        count INTEGER DEFAULT 0
    )
"#;

const CREATE_COMMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL,
        postId INTEGER,
        FOREIGN KEY (postId) REFERENCES posts(id)
    )
"#;

/// Ensure the `posts` and `comments` tables exist.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("ensuring post store schema");

    for statement in [CREATE_POSTS, CREATE_COMMENTS] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(DbError::Write)?;
    }

    Ok(())
}
