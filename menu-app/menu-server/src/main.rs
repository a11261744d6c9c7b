use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use menu_api::{build_router, AppState};
use menu_infrastructure::{create_pool, run_migrations, MemoryMenuStore, MenuStores};
use menu_shared::config::{AppConfig, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes the log file on exit
    let _log_guard = menu_shared::telemetry::init_telemetry(&config.log);

    info!("{} starting ({})...", config.app.name, config.app.env);

    let stores = match config.storage.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = match create_pool(&config.database).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("Failed to connect to database: {}", e);
                    return Err(e.into());
                }
            };
            run_migrations(&pool).await?;
            info!("Database connection established.");
            MenuStores::postgres(pool, &config.ordering)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            MenuStores::memory(MemoryMenuStore::new())
        }
    };

    let state = AppState {
        categories: Arc::new(stores.category_service(&config.ordering)),
        items: Arc::new(stores.item_service(&config.ordering)),
        config: Arc::new(config.clone()),
    };
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
