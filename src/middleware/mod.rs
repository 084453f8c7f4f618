pub mod admin;
pub mod auth;
pub mod response;

pub use admin::require_admin_middleware;
pub use auth::{extract_bearer_token, jwt_auth_middleware, AuthUser};
pub use response::{ApiResponse, ApiResult};
