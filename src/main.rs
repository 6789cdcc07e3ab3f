//! RaffleBuddy
//!
//! Main application entry point

use tracing::info;

use RaffleBuddy::{
    api::{build_router, AppState},
    config::Settings,
    database::connection::{create_pool, run_migrations, DatabaseConfig},
    middleware::AuthMiddleware,
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting RaffleBuddy...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: std::time::Duration::from_secs(30),
        idle_timeout: Some(std::time::Duration::from_secs(600)),
        max_lifetime: Some(std::time::Duration::from_secs(1800)),
    };
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(settings.clone(), db_pool)?;

    if settings.features.sample_data {
        info!("Sample data loading is enabled via POST /api/data/init");
    }

    // Build the router
    let auth = AuthMiddleware::new(&settings);
    if !auth.is_enabled() {
        info!("Security is disabled, API requests are not authenticated");
    }
    let app = build_router(AppState { services, auth });

    // Start the server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("RaffleBuddy is listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("RaffleBuddy has been shut down.");

    Ok(())
}

/// Resolve when a shutdown signal is received
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    info!("Shutdown signal received");
}
