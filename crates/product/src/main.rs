use anyhow::{Context, Result};
use product::{
    bus::{BusHandle, BusServer, Router},
    config::myconfig::Config,
    handler::{ProductCommandHandler, ProductQueryHandler},
    state::AppState,
};
use shared::{config::ConnectionManager, utils::init_logger};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, state) = setup().await.context("Failed to setup application")?;

    let (bus_handle, server_handle) = run_bus_server(&config, &state);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("🛑 Shutdown signal received (Ctrl+C).");

    shutdown(bus_handle, server_handle, &state).await;

    Ok(())
}

async fn setup() -> Result<(Config, Arc<AppState>)> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    init_logger("product-service", is_dev, is_enable_file);

    info!("🚀 Starting Product Service initialization...");

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = Arc::new(AppState::new(db_pool));

    info!("✅ Application setup completed successfully.");
    Ok((config, state))
}

fn run_bus_server(config: &Config, state: &Arc<AppState>) -> (BusHandle, JoinHandle<()>) {
    let query_handler =
        ProductQueryHandler::new(Arc::new(state.di_container.product_query.clone()));
    let command_handler =
        ProductCommandHandler::new(Arc::new(state.di_container.product_command.clone()));

    let router = Router::new(query_handler, command_handler);
    let (handle, server) = BusServer::new(router, config.bus_capacity);

    info!("📡 Starting bus server (capacity: {})", config.bus_capacity);
    let server_handle = tokio::spawn(server.run());

    (handle, server_handle)
}

async fn shutdown(bus_handle: BusHandle, server_handle: JoinHandle<()>, state: &AppState) {
    info!("🛑 Shutting down bus server...");

    // dropping the last handle closes the channel; the server drains
    // in-flight requests and stops on its own
    drop(bus_handle);

    let shutdown_timeout = tokio::time::Duration::from_secs(30);
    match tokio::time::timeout(shutdown_timeout, server_handle).await {
        Ok(Ok(())) => info!("✅ Bus server shutdown gracefully"),
        Ok(Err(e)) => error!("Bus server task failed: {e}"),
        Err(_) => warn!("⚠️  Shutdown timeout reached, forcing exit"),
    }

    state.pool.close().await;

    info!("✅ Product Service shutdown complete.");
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
