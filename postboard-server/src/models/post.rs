//! Post records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Comment;

/// Full post row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    /// Set by the store on insert, never updated
    #[sqlx(rename = "createdAt")]
    pub created_at: NaiveDateTime,
    /// View counter, bumped only by the detail read
    pub count: i64,
}

/// List projection of a post.
///
/// `content` is left out to keep page payloads small.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: NaiveDateTime,
    pub count: i64,
}

/// A post together with every comment that points at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: Post,
    /// Ordered by comment id, empty when the post has none
    pub comments: Vec<Comment>,
}

/// Insert payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            author: Some(author.into()),
        }
    }
}

/// Update payload. Author and view count are not writable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}
