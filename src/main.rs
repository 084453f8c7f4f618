use agency_api::{server, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Picks .env.production when APP_ENV=production, .env otherwise
    let config = AppConfig::load()?;

    server::init_tracing();
    server::serve(config).await
}
