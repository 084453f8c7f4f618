// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`; handlers read the caller
// from `Extension<AuthUser>`.

pub mod dashboard;
pub mod posts;
pub mod session;
pub mod submissions;
