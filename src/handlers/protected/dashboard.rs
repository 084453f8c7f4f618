// handlers/protected/dashboard.rs - GET /api/v1/admin/dashboard/stats

use axum::extract::State;
use serde::Serialize;

use crate::database::models::{Course, Post, PublishStats, Submission, SubmissionCounts};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub submissions: SubmissionCounts,
    pub posts: PublishStats,
    pub courses: PublishStats,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: DashboardStats,
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    let (submissions, posts, courses) = tokio::try_join!(
        Submission::counts(&state.db),
        Post::counts(&state.db),
        Course::counts(&state.db),
    )?;

    Ok(ApiResponse::success(StatsResponse {
        stats: DashboardStats {
            submissions,
            posts: posts.into(),
            courses: courses.into(),
        },
    }))
}
