//! Process bootstrap shared by the `agency-api` binary and `agency serve`.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::database::{run_migrations, DatabaseManager};
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "agency_api=info,tower_http=info";

/// Installs the global fmt subscriber, honouring `RUST_LOG` when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A second init (tests, repeated CLI calls) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Connects, migrates and serves until ctrl-c.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting Agency API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to apply migrations")?;

    let bind_addr = config.server.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    let app = crate::app(AppState::new(config, pool));

    info!("Agency API listening on http://{}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Agency API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
