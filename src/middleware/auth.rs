use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::AuthError;
use crate::database::models::{AdminUser, PublicUser, Role};
use crate::error::ApiError;
use crate::state::AppState;

/// The active admin account behind a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            last_login: self.last_login,
        }
    }
}

impl From<AdminUser> for AuthUser {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            last_login: user.last_login,
        }
    }
}

/// Bearer-token gate: verifies the JWT, resolves the active user and injects `AuthUser`.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).map_err(|err| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), err);
        err
    })?;

    let claims = state.tokens.verify(token).map_err(|err| {
        let err = AuthError::from(err);
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), err);
        err
    })?;

    let user = AdminUser::find_active_by_id(&state.db, claims.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for '{}' ({}) has no active user", claims.username, claims.user_id);
            AuthError::UserNotFound
        })?;

    tracing::debug!("Authenticated {} ({})", user.username, user.role.as_str());

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::TokenMissing)?;
    let value = header.to_str().map_err(|_| AuthError::TokenMalformed)?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AuthError::TokenMalformed),
    }
}
