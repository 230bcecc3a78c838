//! Comment endpoints, nested under their post

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::CommentRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Comment;

/// Create or update comment request
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Created comment echo
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreatedResponse {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
}

/// Reply for a successful comment update or delete
#[derive(Serialize)]
pub struct CommentResultResponse {
    pub result: &'static str,
    pub message: &'static str,
    pub error: &'static str,
}

impl CommentResultResponse {
    pub const SUCCESS: Self = Self {
        result: "ok",
        message: "success",
        error: "",
    };
}

/// Comments of one post
#[derive(Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
}

/// POST /posts/{id}/comments - add a comment (post existence is not checked)
#[instrument(skip(state, req))]
async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), ApiError> {
    let id = CommentRepo::new(&state.pool)
        .create(post_id, &req.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            id,
            post_id,
            content: req.content,
        }),
    ))
}

/// GET /posts/{id}/comments - list comments for a post
#[instrument(skip(state))]
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<CommentListResponse>, ApiError> {
    let comments = CommentRepo::new(&state.pool).list_by_post(post_id).await?;
    Ok(Json(CommentListResponse { comments }))
}

/// PUT /posts/{id}/comments/{comment_id} - replace comment content
///
/// Comments are addressed by their own id; the post segment is not checked.
#[instrument(skip(state, req))]
async fn update_comment(
    State(state): State<Arc<AppState>>,
    Path((_post_id, id)): Path<(i64, i64)>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<CommentResultResponse>, ApiError> {
    if !CommentRepo::new(&state.pool).update(id, &req.content).await? {
        return Err(ApiError::not_found("comment", id));
    }
    Ok(Json(CommentResultResponse::SUCCESS))
}

/// DELETE /posts/{id}/comments/{comment_id} - delete a comment
#[instrument(skip(state))]
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path((_post_id, id)): Path<(i64, i64)>,
) -> Result<Json<CommentResultResponse>, ApiError> {
    if !CommentRepo::new(&state.pool).delete(id).await? {
        return Err(ApiError::not_found("comment", id));
    }
    Ok(Json(CommentResultResponse::SUCCESS))
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/posts/{id}/comments/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::db::test_support::fresh_store;
    use crate::http::routes::test_support::send;
    use crate::http::{build_router, AppState, ServerConfig};

    #[tokio::test]
    async fn comment_lifecycle() {
        let (_dir, pool) = fresh_store().await;
        let app = build_router(AppState::new(pool), &ServerConfig::default());

        let (status, body) = send(
            &app,
            Method::POST,
            "/posts/1/comments",
            Some(json!({"content": "first!"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["postId"], 1);
        assert_eq!(body["content"], "first!");
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, Method::GET, "/posts/1/comments", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["comments"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/posts/1/comments/{id}"),
            Some(json!({"content": "edited"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": "ok", "message": "success", "error": ""}));

        let (_, body) = send(&app, Method::GET, "/posts/1/comments", None).await;
        assert_eq!(body["comments"][0]["content"], "edited");

        let (status, body) = send(&app, Method::DELETE, &format!("/posts/1/comments/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "ok");
        assert_eq!(body["message"], "success");
        assert_eq!(body["error"], "");

        let (status, body) = send(&app, Method::DELETE, &format!("/posts/1/comments/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], format!("comment '{id}' not found"));
    }

    #[tokio::test]
    async fn update_missing_comment_is_404() {
        let (_dir, pool) = fresh_store().await;
        let app = build_router(AppState::new(pool), &ServerConfig::default());

        let (status, _) = send(
            &app,
            Method::PUT,
            "/posts/1/comments/77",
            Some(json!({"content": "ghost"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
