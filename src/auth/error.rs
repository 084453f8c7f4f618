use thiserror::Error;

use super::token::TokenError;

/// Reasons a caller is refused by the auth gate or the login handler
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token is missing")]
    TokenMissing,

    #[error("Invalid token format")]
    TokenMalformed,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("User not found or inactive")]
    UserNotFound,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Invalid | TokenError::Generation(_) => AuthError::TokenInvalid,
        }
    }
}
