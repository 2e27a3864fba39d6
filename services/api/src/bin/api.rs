//! services/api/src/bin/api.rs

use persona_cart_api::{
    adapters::{db::DbAdapter, memory::InMemoryDb},
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState},
};
use persona_cart_core::{catalog::sample_products, ports::DatabaseService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Storage & Run Migrations ---
    let db: Arc<dyn DatabaseService> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;
            let db_adapter = DbAdapter::new(db_pool);
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(db_adapter)
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store, data is lost on restart");
            Arc::new(InMemoryDb::new())
        }
    };

    // --- 3. Seed the Catalog ---
    let seeded = db.seed_products(&sample_products()).await?;
    if seeded > 0 {
        info!("Sample products seeded: {}", seeded);
    }

    // --- 4. Build the Shared AppState & Router ---
    let app_state = Arc::new(AppState::new(db, config.clone()));
    let app = build_router(app_state)?;

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
