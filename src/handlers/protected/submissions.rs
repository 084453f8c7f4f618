// handlers/protected/submissions.rs - admin triage of incoming leads

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Submission, SubmissionFilter, SubmissionListItem, SubmissionStatus};
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/v1/admin/submissions?status=&service=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SubmissionFilter>,
) -> ApiResult<Vec<SubmissionListItem>> {
    let submissions = Submission::list(&state.db, &filter).await?;
    Ok(ApiResponse::success(submissions))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

impl UpdateStatusRequest {
    fn status(&self) -> Result<SubmissionStatus, ApiError> {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ApiError::bad_request("Invalid status"))
    }
}

/// PUT /api/v1/admin/submissions/:id - move a submission to another status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult<Submission> {
    let Json(request) = payload?;
    let status = request.status()?;
    let id = path_id(path, "Submission not found")?;

    let mut tx = state.db.begin().await?;
    let submission = Submission::update_status(&mut *tx, id, status)
        .await?
        .ok_or_else(|| ApiError::not_found("Submission not found"))?;
    tx.commit().await?;

    tracing::info!("{} set submission {} to {}", user.username, id, status.as_str());

    Ok(ApiResponse::success(submission))
}
