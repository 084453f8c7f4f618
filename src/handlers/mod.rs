// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) -> Protected (bearer token) -> Elevated (bearer token + admin role)

pub mod elevated;
pub mod protected;
pub mod public;

use axum::extract::{rejection::PathRejection, Path};
use uuid::Uuid;

use crate::error::ApiError;

/// Reads an `:id` segment. A value that isn't a UUID can't name any row, so it
/// gets the same 404 as a missing one.
pub(crate) fn path_id(path: Result<Path<Uuid>, PathRejection>, not_found: &'static str) -> Result<Uuid, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Unresolvable id in path: {}", rejection.body_text());
            Err(ApiError::not_found(not_found))
        }
    }
}

