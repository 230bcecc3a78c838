//! Post endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::db::PostRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{NewPost, Pagination, PaginationParams, Post, PostChanges, PostSummary, PostWithComments};

/// Reply for a successful create
#[derive(Serialize)]
pub struct CreatedResponse {
    pub result: &'static str,
    pub id: i64,
}

/// Reply for a successful update or delete
#[derive(Serialize)]
pub struct ResultResponse {
    pub result: &'static str,
}

impl ResultResponse {
    pub const SUCCESS: Self = Self { result: "success" };
}

/// One page of post summaries
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPageResponse {
    pub items: Vec<PostSummary>,
    pub current_page: i64,
    pub total_pages: i64,
}

/// Single item wrapper
#[derive(Serialize)]
pub struct ItemResponse<T> {
    pub item: T,
}

/// POST /posts - create a post
#[instrument(skip(state, req))]
async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewPost>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = PostRepo::new(&state.pool).create(&req).await?;
    tracing::info!(post_id = id, "post created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            result: "success",
            id,
        }),
    ))
}

/// GET /posts?page=N - list post summaries, newest first
#[instrument(skip(state))]
async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PostPageResponse>, ApiError> {
    let page = Pagination::from(params);
    let result = PostRepo::new(&state.pool).list_page(page).await?;
    let total_pages = result.total_pages();

    Ok(Json(PostPageResponse {
        items: result.items,
        current_page: result.page,
        total_pages,
    }))
}

/// GET /posts/{id} - post detail, counts as a view
#[instrument(skip(state))]
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse<Post>>, ApiError> {
    let post = PostRepo::new(&state.pool).get_and_bump_count(id).await?;
    Ok(Json(ItemResponse { item: post }))
}

/// GET /posts/{id}/comments-tree - post with all of its comments
#[instrument(skip(state))]
async fn get_post_with_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse<PostWithComments>>, ApiError> {
    let nested = PostRepo::new(&state.pool).get_with_comments(id).await?;
    Ok(Json(ItemResponse { item: nested }))
}

/// PUT /posts/{id} - overwrite title and content
#[instrument(skip(state, req))]
async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<PostChanges>,
) -> Result<Json<ResultResponse>, ApiError> {
    if !PostRepo::new(&state.pool).update(id, &req).await? {
        return Err(ApiError::not_found("post", id));
    }
    Ok(Json(ResultResponse::SUCCESS))
}

/// DELETE /posts/{id} - delete a post, leaving its comments
#[instrument(skip(state))]
async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ResultResponse>, ApiError> {
    if !PostRepo::new(&state.pool).delete(id).await? {
        return Err(ApiError::not_found("post", id));
    }
    Ok(Json(ResultResponse::SUCCESS))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/{id}/comments-tree", get(get_post_with_comments))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use serde_json::json;

    use crate::db::test_support::fresh_store;
    use crate::http::routes::test_support::send;
    use crate::http::{build_router, AppState, ServerConfig};

    async fn app() -> (tempfile::TempDir, Router) {
        let (dir, pool) = fresh_store().await;
        (dir, build_router(AppState::new(pool), &ServerConfig::default()))
    }

    async fn create(app: &Router, title: &str) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/posts",
            Some(json!({"title": title, "content": "body", "author": "han"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["result"], "success");
        body["id"].as_i64().expect("id")
    }

    #[tokio::test]
    async fn create_then_detail_bumps_count() {
        let (_dir, app) = app().await;
        let id = create(&app, "hello").await;

        let (status, body) = send(&app, Method::GET, &format!("/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["title"], "hello");
        assert_eq!(body["item"]["author"], "han");
        assert_eq!(body["item"]["count"], 1);
        assert!(body["item"]["createdAt"].is_string());

        let (_, body) = send(&app, Method::GET, &format!("/posts/{id}"), None).await;
        assert_eq!(body["item"]["count"], 2);
    }

    #[tokio::test]
    async fn missing_post_is_404() {
        let (_dir, app) = app().await;

        let (status, body) = send(&app, Method::GET, "/posts/41", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, _) = send(&app, Method::GET, "/posts/41/comments-tree", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/posts/41",
            Some(json!({"title": "t", "content": "c"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/posts/41", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_reports_paging_metadata() {
        let (_dir, app) = app().await;
        for i in 0..12 {
            create(&app, &format!("post {i}")).await;
        }

        let (status, body) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["items"].as_array().unwrap().len(), 5);
        assert!(body["items"][0].get("content").is_none());

        let (_, body) = send(&app, Method::GET, "/posts?page=3", None).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, Method::GET, "/posts?page=4", None).await;
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["currentPage"], 4);

        let (_, body) = send(&app, Method::GET, "/posts?page=abc", None).await;
        assert_eq!(body["currentPage"], 1);
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let (_dir, app) = app().await;
        let id = create(&app, "draft").await;

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/posts/{id}"),
            Some(json!({"title": "final", "content": "done", "author": "ignored"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "success");

        let (_, body) = send(&app, Method::GET, &format!("/posts/{id}"), None).await;
        assert_eq!(body["item"]["title"], "final");
        assert_eq!(body["item"]["author"], "han");

        let (status, _) = send(&app, Method::DELETE, &format!("/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, &format!("/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn comments_tree_nests_comments() {
        let (_dir, app) = app().await;
        let id = create(&app, "with replies").await;

        let (_, body) = send(&app, Method::GET, &format!("/posts/{id}/comments-tree"), None).await;
        assert_eq!(body["item"]["comments"], json!([]));

        for text in ["a", "b"] {
            send(
                &app,
                Method::POST,
                &format!("/posts/{id}/comments"),
                Some(json!({"content": text})),
            )
            .await;
        }

        let (status, body) = send(&app, Method::GET, &format!("/posts/{id}/comments-tree"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["id"], id);
        assert_eq!(body["item"]["count"], 0);
        let comments = body["item"]["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0]["content"], "a");
        assert_eq!(comments[1]["postId"], id);
    }
}
