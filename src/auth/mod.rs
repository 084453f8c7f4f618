pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Claims, TokenError, TokenService};
