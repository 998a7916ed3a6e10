use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use blog_core::post::{CreatePostPayload, PostId, PostView, UpdatePostPayload};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Blog post resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostView>>> {
    let posts = state.store().list().await?;
    Ok(Json(posts.iter().map(PostView::from).collect()))
}

async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PostView>)> {
    let Json(payload) = payload?;
    let post = state.store().insert(payload.validate()?).await?;
    tracing::info!(post_id = %post.id, "Created blog post");
    Ok((StatusCode::CREATED, Json(post.to_client_view())))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostView>> {
    let id = PostId::parse(&id)?;
    let post = state
        .store()
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no blog post with id {id}")))?;
    Ok(Json(post.to_client_view()))
}

/// Deleting an id that does not exist still answers 204.
async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = PostId::parse(&id)?;
    if state.store().delete(id).await? {
        tracing::info!(post_id = %id, "Deleted blog post");
    } else {
        tracing::debug!(post_id = %id, "Delete of unknown blog post");
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostPayload>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(payload) = payload?;
    let (id, changes) = payload.validate(&id)?;
    state
        .store()
        .update(id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no blog post with id {id}")))?;
    tracing::info!(post_id = %id, "Updated blog post");
    Ok(StatusCode::NO_CONTENT)
}
