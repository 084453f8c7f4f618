// handlers/public/seed.rs - POST /api/v1/init-demo

use axum::extract::State;
use serde::Serialize;

use crate::database::seed::{self, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DefaultCredentials {
    pub username: &'static str,
    pub password: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InitDemoResponse {
    pub message: &'static str,
    pub admin_credentials: DefaultCredentials,
}

/// Seed the default admin and service catalog. The body is the same whether or not
/// anything was inserted on this call.
pub async fn init_demo(State(state): State<AppState>) -> ApiResult<InitDemoResponse> {
    if !state.config.security.allow_demo_seed {
        return Err(ApiError::forbidden("Demo seeding is disabled"));
    }

    seed::seed_demo_data(&state.db).await?;

    Ok(ApiResponse::success(InitDemoResponse {
        message: "Demo data initialized successfully",
        admin_credentials: DefaultCredentials {
            username: DEFAULT_ADMIN_USERNAME,
            password: DEFAULT_ADMIN_PASSWORD,
        },
    }))
}
