// handlers/public/content.rs - published posts and courses

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::database::models::{Course, Post, PostType};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// GET /api/v1/posts?type=blog|case-study
pub async fn list_posts(State(state): State<AppState>, Query(query): Query<PostQuery>) -> ApiResult<Vec<Post>> {
    let post_type = query
        .post_type
        .as_deref()
        .map(str::parse::<PostType>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let posts = Post::list_published(&state.db, post_type).await?;
    Ok(ApiResponse::success(posts))
}

/// GET /api/v1/posts/:slug
pub async fn show_post(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Post> {
    let post = Post::find_published_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    Ok(ApiResponse::success(post))
}

/// GET /api/v1/courses
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Vec<Course>> {
    let courses = Course::list_published(&state.db).await?;
    Ok(ApiResponse::success(courses))
}
