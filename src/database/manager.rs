use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Duplicate value violates unique constraint {0}")]
    UniqueViolation(String),

    #[error("{0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return DatabaseError::UniqueViolation(constraint);
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Owns construction of the shared connection pool
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connects the pool and verifies it with a round trip.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        info!("Connecting to database {}", Self::redact_url(&config.url)?);

        let pool = Self::pool_options(config).connect(&config.url).await?;
        Self::health_check(&pool).await?;

        info!("Database pool ready (max {} connections)", config.max_connections);
        Ok(pool)
    }

    /// Builds the pool without opening a connection until first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        Self::redact_url(&config.url)?;
        Ok(Self::pool_options(config).connect_lazy(&config.url)?)
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Database URL with the password masked, for logs.
    pub fn redact_url(database_url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("****"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
