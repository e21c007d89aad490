//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.
//!
//! Environment configuration (read once here, never inside business
//! logic): `DATABASE_URL`, `PORT`, `FRONTEND_ORIGINS`,
//! `AUTH_TOKEN_SECRET`.

use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use catalog::{PgCatalogRepository, catalog_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = auth_config_from_env()?;

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| "http://localhost:9090".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Stores
    let auth_repo = PgAuthRepository::new(pool.clone());
    let catalog_repo = PgCatalogRepository::new(pool.clone());

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth_repo.clone(), auth_config.clone()))
        .nest(
            "/api/pets",
            catalog_router(catalog_repo, auth_repo, auth_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the token-signing secret from the environment
///
/// Debug builds fall back to a generated secret (with a warning, since
/// every restart invalidates outstanding tokens); production must set
/// `AUTH_TOKEN_SECRET` explicitly.
fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    match env::var("AUTH_TOKEN_SECRET") {
        Ok(secret_b64) => {
            let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
            anyhow::ensure!(
                secret_bytes.len() == 32,
                "AUTH_TOKEN_SECRET must be 32 base64-encoded bytes"
            );
            let mut secret = [0u8; 32];
            secret.copy_from_slice(&secret_bytes);
            Ok(AuthConfig {
                token_secret: secret,
                ..AuthConfig::default()
            })
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!(
                "AUTH_TOKEN_SECRET not set; using a generated development secret, \
                 outstanding tokens will not survive a restart"
            );
            Ok(AuthConfig::development())
        }
        Err(_) => anyhow::bail!("AUTH_TOKEN_SECRET must be set in production"),
    }
}
