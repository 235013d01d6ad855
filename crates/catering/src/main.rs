use anyhow::{Context, Result};
use catering::{handler::AppRouter, state::AppState};
use shared::{
    config::{Config, ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, state, telemetry) = setup().await.context("Failed to setup application")?;

    let result = AppRouter::serve(config.port, state).await;

    info!("🛑 Server stopped, flushing telemetry...");

    if let Err(e) = telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {e:#}");
    }

    result
}

async fn setup() -> Result<(Config, Arc<AppState>, Telemetry)> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init("catering-service", &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    init_logger(
        telemetry.logger_provider(),
        "catering-service",
        is_dev,
        is_enable_file,
    );

    let db_pool =
        ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied.");
    }

    let state = Arc::new(
        AppState::new(db_pool, &config)
            .await
            .context("Failed to create AppState")?,
    );

    info!("✅ Application setup completed successfully.");
    Ok((config, state, telemetry))
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}
