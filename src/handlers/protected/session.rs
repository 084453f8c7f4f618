// handlers/protected/session.rs - POST /api/v1/admin/verify-token

use axum::Extension;
use serde::Serialize;

use crate::database::models::PublicUser;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: PublicUser,
}

/// Reaching this handler means the gate accepted the token.
pub async fn verify_token(Extension(user): Extension<AuthUser>) -> ApiResult<VerifyResponse> {
    Ok(ApiResponse::success(VerifyResponse {
        valid: true,
        user: user.public(),
    }))
}
