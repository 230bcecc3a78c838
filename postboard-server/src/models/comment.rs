//! Comment records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Comment row.
///
/// `post_id` is not guaranteed to reference an existing post: deleting a
/// post leaves its comments in place.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[sqlx(rename = "postId")]
    pub post_id: i64,
}
