//! Shared application state handed to every route and middleware.

use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: AppConfig, db: PgPool) -> Self {
        let tokens = TokenService::from_config(&config.security);
        Self {
            config: Arc::new(config),
            db,
            tokens: Arc::new(tokens),
        }
    }
}
