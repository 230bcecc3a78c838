//! Post repository
//!
//! Handles post CRUD with:
//! - Paginated summary listing, newest first
//! - Atomic view-count bump and read (`UPDATE ... RETURNING`)
//! - Post plus comments in a single JOIN + JSON aggregate query

use sqlx::{FromRow, Row, SqlitePool};

use crate::db::DbError;
use crate::models::{
    Comment, NewPost, Paginated, Pagination, Post, PostChanges, PostSummary, PostWithComments,
};

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a post and return its id. `createdAt` and `count` take the
    /// store defaults.
    pub async fn create(&self, new: &NewPost) -> Result<i64, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content, author)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(new.title.as_deref())
        .bind(new.content.as_deref())
        .bind(new.author.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(DbError::Write)?;

        tracing::debug!(post_id = id, "created post");
        Ok(id)
    }

    /// List post summaries, newest first.
    ///
    /// Ties on `createdAt` are broken by id (higher id first) so pages stay
    /// stable. The page and the total are read in one transaction so they
    /// describe the same snapshot. A page past the end is empty, not an error.
    pub async fn list_page(&self, page: Pagination) -> Result<Paginated<PostSummary>, DbError> {
        let mut tx = self.pool.begin().await.map_err(DbError::Read)?;

        let items: Vec<PostSummary> = sqlx::query_as(
            r#"
            SELECT id, title, author, createdAt, count
            FROM posts
            ORDER BY createdAt DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await
        .map_err(DbError::Read)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM posts")
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::Read)?;

        tx.commit().await.map_err(DbError::Read)?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Increment the view counter and return the updated row.
    ///
    /// One statement, so concurrent calls on the same id each observe
    /// their own increment and none is lost. A missing id mutates nothing.
    pub async fn get_and_bump_count(&self, id: i64) -> Result<Post, DbError> {
        let post: Post = sqlx::query_as(
            r#"
            UPDATE posts
            SET count = count + 1
            WHERE id = ?
            RETURNING id, title, content, author, createdAt, count
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(DbError::Write)?
        .ok_or(DbError::NotFound { resource: "post", id })?;

        tracing::debug!(post_id = id, count = post.count, "bumped view count");
        Ok(post)
    }

    /// Get a single post by id without touching the view counter.
    #[cfg(test)]
    pub async fn get(&self, id: i64) -> Result<Post, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, title, content, author, createdAt, count
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(DbError::Read)?
        .ok_or(DbError::NotFound { resource: "post", id })
    }

    /// Overwrite title and content. Returns false when no row matched.
    pub async fn update(&self, id: i64, changes: &PostChanges) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE posts SET title = ?, content = ? WHERE id = ?")
            .bind(changes.title.as_deref())
            .bind(changes.content.as_deref())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DbError::Write)?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a post. Its comments are left in place.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DbError::Write)?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a post with all of its comments in one query.
    ///
    /// The comments are aggregated into a JSON array next to the post
    /// columns, so the list reflects a single point in time.
    pub async fn get_with_comments(&self, id: i64) -> Result<PostWithComments, DbError> {
        let row = sqlx::query(
            r#"
            SELECT
                p.id AS id,
                p.title AS title,
                p.content AS content,
                p.author AS author,
                p.createdAt AS createdAt,
                p.count AS count,
                COALESCE(
                    json_group_array(
                        json_object('id', c.id, 'content', c.content, 'postId', c.postId)
                    ) FILTER (WHERE c.id IS NOT NULL),
                    '[]'
                ) AS comments
            FROM posts p
            LEFT JOIN comments c ON c.postId = p.id
            WHERE p.id = ?
            GROUP BY p.id
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(DbError::Read)?
        .ok_or(DbError::NotFound { resource: "post", id })?;

        let post = Post::from_row(&row).map_err(DbError::Read)?;
        let raw: String = row.try_get("comments").map_err(DbError::Read)?;
        let mut comments: Vec<Comment> = serde_json::from_str(&raw)
            .map_err(|e| DbError::Read(sqlx::Error::Decode(Box::new(e))))?;
        comments.sort_by_key(|c| c.id);

        Ok(PostWithComments { post, comments })
    }
}
