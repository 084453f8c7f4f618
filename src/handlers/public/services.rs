// handlers/public/services.rs - public service catalog and lead intake

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{NewSubmission, Service, ServiceView, Submission};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/services - every active service
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ServiceView>> {
    let services = Service::list_active(&state.db).await?;
    Ok(ApiResponse::success(
        services.into_iter().map(ServiceView::from).collect(),
    ))
}

/// GET /api/v1/services/:slug - one active service
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<ServiceView> {
    let service = Service::find_active_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    Ok(ApiResponse::success(service.into()))
}

/// Contact form body. Every field is optional free text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl SubmitRequest {
    /// A blank body submits every field as empty; the content type is not checked.
    /// A non-blank body must parse as the form.
    fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| ApiError::invalid_json(format!("Invalid request body: {}", e)))
    }

    fn into_submission(self, service_id: Uuid) -> NewSubmission {
        let clean = |value: Option<String>| value.map(|v| v.trim().to_string()).unwrap_or_default();
        NewSubmission {
            service_id: Some(service_id),
            full_name: clean(self.full_name),
            email: clean(self.email),
            company: clean(self.company),
            phone: clean(self.phone),
            message: clean(self.message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub id: Uuid,
}

/// POST /api/v1/services/:slug/submit - record a lead against an active service
pub async fn submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Bytes,
) -> ApiResult<SubmitResponse> {
    let service = Service::find_active_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    let request = SubmitRequest::from_body(&body)?;

    // Dropping an uncommitted transaction rolls it back.
    let mut tx = state.db.begin().await?;
    let submission = Submission::create(&mut *tx, &request.into_submission(service.id)).await?;
    tx.commit().await?;

    tracing::info!("New submission {} for service '{}'", submission.id, service.slug);

    Ok(ApiResponse::created(SubmitResponse {
        message: "Submission received successfully",
        id: submission.id,
    }))
}
