//! # Launchpad Web Server
//!
//! Serves the marketing landing page and the session check endpoint.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=... cargo run -p launchpad-web
//! ```

use launchpad_web::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "launchpad_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Launchpad web v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    if config.database.is_none() {
        tracing::info!("DATABASE_URL not set, /health will report the database as not configured");
    }

    // A broken template stops startup
    launchpad_web::pages::landing_page_html()
        .map_err(|e| anyhow::anyhow!("Failed to render landing page: {}", e))?;

    let state = AppState::from_config(config)?;
    let db = state.db.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        launchpad_shared::db::pool::close_pool(db).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
