// handlers/elevated/posts.rs - DELETE /api/v1/admin/posts/:id (admin role only)

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::Post;
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub id: Uuid,
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<DeleteResponse> {
    let id = path_id(path, "Post not found")?;
    let mut tx = state.db.begin().await?;
    if !Post::delete(&mut *tx, id).await? {
        return Err(ApiError::not_found("Post not found"));
    }
    tx.commit().await?;

    tracing::info!("{} deleted post {}", user.username, id);
    Ok(ApiResponse::success(DeleteResponse {
        message: "Post deleted",
        id,
    }))
}
