/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use launchpad_web::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::from_config(config)?;
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use launchpad_shared::{
    auth::identity::{IdentityResolver, JwtIdentityResolver},
    db::pool::{create_lazy_pool, DatabaseConfig},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database pool, only present when a database is configured
    pub db: Option<PgPool>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Identity collaborator consulted by the auth check
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    /// Creates state from its parts
    pub fn new(db: Option<PgPool>, config: Config, identity: Arc<dyn IdentityResolver>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            identity,
        }
    }

    /// Creates state with a JWT identity resolver and a lazy pool built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` cannot be parsed.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let identity = JwtIdentityResolver::new(config.auth.jwt_secret.clone())
            .with_issuer(config.auth.issuer.clone())
            .with_cookie_name(config.auth.session_cookie.clone());

        let db = config
            .database
            .as_ref()
            .map(|database| {
                create_lazy_pool(&DatabaseConfig {
                    url: database.url.clone(),
                    max_connections: database.max_connections,
                    connect_timeout_seconds: 5,
                    ..Default::default()
                })
            })
            .transpose()?;

        Ok(Self::new(db, config, Arc::new(identity)))
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET /                  # Landing page (HTML)
/// ├── GET /health            # Health check
/// └── /api/
///     └── GET /auth/check    # Who is the caller?
/// ```
///
/// Anything else is a JSON 404.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Compression (gzip/br)
/// 3. CORS
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new().route("/auth/check", get(routes::auth::check));

    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/", get(routes::landing::landing_page))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
