// ABOUTME: Server bootstrap for the Skyz proposal service
// ABOUTME: Turns the environment configuration into application state and serves the router

pub mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use skz_api::{create_router, AppState};
use skz_catalog::{CompanyProfile, ServiceCatalog};
use skz_notify::mailer_from_config;
use skz_storage::ProposalStorage;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

pub use config::{Config, ConfigError};

/// Installs the global tracing subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

pub async fn open_storage(config: &Config) -> anyhow::Result<ProposalStorage> {
    let pool = skz_storage::connect(config.database_path.clone())
        .await
        .context("Failed to open the proposals database")?;
    Ok(ProposalStorage::new(pool))
}

pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let storage = open_storage(config).await?;
    let mailer = mailer_from_config(config.resend_api_key.as_deref(), config.email_from.as_deref())
        .context("Failed to set up the email client")?;

    if mailer.is_dev_mode() {
        warn!("RESEND_API_KEY not set; proposal emails will only be logged");
    }
    if config.admin_password.is_none() {
        warn!("ADMIN_PASSWORD not set; admin login is disabled");
    }

    let company = match &config.whatsapp {
        Some(number) => CompanyProfile::skyz().with_whatsapp(number.as_str()),
        None => CompanyProfile::skyz(),
    };

    Ok(AppState::new(
        Arc::new(ServiceCatalog::standard()),
        Arc::new(company),
        storage,
        mailer,
        config.api_settings(),
    ))
}

pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any))
}

pub fn app(state: AppState, config: &Config) -> anyhow::Result<Router> {
    Ok(create_router(state).layer(cors_layer(&config.cors_origin)?))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = build_state(&config).await?;
    let app = app(state, &config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        address = %addr,
        cors_origin = %config.cors_origin,
        base_url = %config.base_url,
        "Proposal API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
