//! Comment repository
//!
//! Comments are scoped to a post by `postId` only. Nothing here checks
//! that the post exists.

use sqlx::SqlitePool;

use crate::db::DbError;
use crate::models::Comment;

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a comment to a post and return its id.
    pub async fn create(&self, post_id: i64, content: &str) -> Result<i64, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO comments (postId, content)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(content)
        .fetch_one(self.pool)
        .await
        .map_err(DbError::Write)?;

        tracing::debug!(comment_id = id, post_id, "created comment");
        Ok(id)
    }

    /// All comments pointing at `post_id`, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, content, postId
            FROM comments
            WHERE postId = ?
            ORDER BY id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await
        .map_err(DbError::Read)
    }

    /// Replace a comment's content. Returns false when no row matched.
    pub async fn update(&self, id: i64, content: &str) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE comments SET content = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DbError::Write)?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a comment. Returns false when no row matched.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DbError::Write)?;

        Ok(result.rows_affected() > 0)
    }
}
