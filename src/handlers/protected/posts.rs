// handlers/protected/posts.rs - post management for editors and admins

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use uuid::Uuid;

use crate::database::models::{NewPost, Post, PostChanges};
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/v1/admin/posts - drafts included
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Post>> {
    let posts = Post::list_all(&state.db).await?;
    Ok(ApiResponse::success(posts))
}

/// POST /api/v1/admin/posts
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> ApiResult<Post> {
    let Json(mut post) = payload?;
    post.slug = post.slug.trim().to_string();
    post.title = post.title.trim().to_string();

    if post.slug.is_empty() || post.title.is_empty() {
        return Err(ApiError::bad_request("Slug and title are required"));
    }
    if post.author_name.is_none() {
        post.author_name = Some(user.username.clone());
    }

    let mut tx = state.db.begin().await?;
    let created = Post::create(&mut *tx, &post).await?;
    tx.commit().await?;

    tracing::info!("{} created post '{}'", user.username, created.slug);
    Ok(ApiResponse::created(created))
}

/// PUT /api/v1/admin/posts/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PostChanges>, JsonRejection>,
) -> ApiResult<Post> {
    let id = path_id(path, "Post not found")?;
    let Json(mut changes) = payload?;
    if let Some(slug) = changes.slug.as_mut() {
        *slug = slug.trim().to_string();
        if slug.is_empty() {
            return Err(ApiError::bad_request("Slug cannot be empty"));
        }
    }

    let mut tx = state.db.begin().await?;
    let updated = Post::update(&mut *tx, id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    tx.commit().await?;

    tracing::info!("{} updated post '{}'", user.username, updated.slug);
    Ok(ApiResponse::success(updated))
}
