// handlers/public/login.rs - POST /api/v1/admin/login

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{password::verify_password_blocking, AuthError};
use crate::database::models::{AdminUser, PublicUser};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
    pub message: &'static str,
}

/// Exchange admin credentials for a bearer token.
///
/// Unknown users and wrong passwords get the same 401 so usernames can't be probed.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;
    let username = request.username.trim();
    let password = request.password.trim();

    if username.is_empty() || password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let Some(mut user) = AdminUser::find_active_by_username(&state.db, username).await? else {
        tracing::warn!("Failed login for unknown user '{}'", username);
        return Err(AuthError::InvalidCredentials.into());
    };

    if !verify_password_blocking(password.to_string(), user.password_hash.clone()).await {
        tracing::warn!("Failed login for '{}': wrong password", username);
        return Err(AuthError::InvalidCredentials.into());
    }

    let mut tx = state.db.begin().await?;
    user.last_login = Some(AdminUser::record_login(&mut *tx, user.id).await?);
    tx.commit().await?;

    let token = state.tokens.issue(user.id, &user.username, user.role)?;

    tracing::info!("Admin '{}' logged in", user.username);

    Ok(ApiResponse::success(LoginResponse {
        token,
        user: user.public(),
        message: "Login successful",
    }))
}
