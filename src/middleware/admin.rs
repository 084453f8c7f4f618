use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::auth::AuthError;
use crate::error::ApiError;

/// Role gate layered inside `jwt_auth_middleware`; only `admin` callers pass.
pub async fn require_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::internal_server_error("Authentication must run before the admin check"))?;

    if !user.is_admin() {
        tracing::warn!(
            "Admin check failed: '{}' ({}) tried {} {}",
            user.username,
            user.role.as_str(),
            request.method(),
            request.uri().path()
        );
        return Err(AuthError::AdminRequired.into());
    }

    Ok(next.run(request).await)
}
