pub mod config;
pub mod db;
pub mod errors;
pub mod http;
mod middleware;
pub mod models;
pub mod state;
pub mod views;

use axum::{Router, error_handling::HandleErrorLayer, middleware as axum_middleware};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use config::Config;
use db::MemoryStore;
use errors::AppError;
use middleware::{cors_layer, create_rate_limiter, handle_timeout_error, rate_limit_middleware};
use state::{ClinicState, OrchardState, SharedClinicStore, SharedOrchardStore};

pub use http::{create_clinic_routes, create_orchard_routes};

pub const CLINIC_DEFAULT_PORT: u16 = 3001;
pub const ORCHARD_DEFAULT_PORT: u16 = 3002;

pub async fn start_clinic_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env(CLINIC_DEFAULT_PORT)?;

    let store: SharedClinicStore = if config.in_memory {
        tracing::info!("Using in-memory clinic store");
        Arc::new(MemoryStore::seeded())
    } else {
        let postgres = db::connect(&config).await?;
        db::migrate_clinic(&postgres).await?;
        if config.seed_database {
            db::seed::seed_clinic(postgres.clone()).await?;
        }
        Arc::new(postgres)
    };

    let app = create_clinic_routes(ClinicState { store });
    serve(app, &config, "Clinic").await
}

pub async fn start_orchard_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env(ORCHARD_DEFAULT_PORT)?;

    let store: SharedOrchardStore = if config.in_memory {
        tracing::info!("Using in-memory orchard store");
        Arc::new(MemoryStore::seeded())
    } else {
        let postgres = db::connect(&config).await?;
        db::migrate_orchard(&postgres).await?;
        if config.seed_database {
            db::seed::seed_orchard(postgres.clone()).await?;
        }
        Arc::new(postgres)
    };

    let app = create_orchard_routes(OrchardState { store });
    serve(app, &config, "Orchard").await
}

/// Wraps app routes in the shared stack: 404 fallback, request timeout,
/// per-IP rate limit, CORS and request tracing.
pub fn build_app(routes: Router, config: &Config) -> Result<Router, AppError> {
    let rate_limiter = create_rate_limiter(config.rate_limit_per_minute)?;

    Ok(routes
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(config.request_timeout),
        )
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer(&config.allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

async fn serve(routes: Router, config: &Config, name: &str) -> Result<(), AppError> {
    let app = build_app(routes, config)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {}: {}", config.port, e)))?;

    tracing::info!("{} server running at http://127.0.0.1:{}", name, config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| {
        tracing::error!("{} server stopped: {}", name, e);
        AppError::InternalError
    })
}
