//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use account::{AccountConfig, PgAccountRepository, app_router};
use anyhow::Context;
use axum::http::{self, Method, StatusCode, header};
use config::ServiceConfig;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,account=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service_config = ServiceConfig::from_env()?;
    tracing::debug!(config = ?service_config, "Configuration loaded");

    if service_config.uses_default_jwt_key() {
        tracing::warn!("JWT_KEY not set, signing tokens with the built-in development key");
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(service_config.db_max_connections)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect(&service_config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    tracing::info!("Connected to database");

    if service_config.run_migrations {
        sqlx::migrate!("../../database/migrations")
            .run(&pool)
            .await?;
        tracing::info!("Migrations completed");
    }

    let mut account_config = AccountConfig::new(service_config.jwt_key.as_bytes());
    if let Some(pepper) = &service_config.password_pepper {
        account_config = account_config.with_pepper(pepper.as_bytes());
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = service_config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = app_router(PgAccountRepository::new(pool), account_config)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            service_config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = service_config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
