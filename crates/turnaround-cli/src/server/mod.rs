//! HTTP dashboard server.
//!
//! Sets up routes and middleware (compression, tracing) around the
//! login-gated dashboard and serves them with tokio.

mod error;
mod handlers;
mod state;

pub use state::AppState;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use chrono::Local;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;
use turnaround_core::DashboardConfig;

use crate::commands::build_provider;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/table", get(handlers::table))
        .route("/login", get(handlers::show_login).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/health", get(handlers::health_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port`, resolving host names
pub async fn bind(host: &str, port: u16) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))
}

/// Generate the dataset once and serve until the process is stopped
pub async fn serve(config: DashboardConfig, host: &str, port: u16) -> Result<()> {
    let provider = build_provider(&config);
    let state = AppState::new(config, provider);
    let app = create_router(state);

    let listener = bind(host, port).await?;
    let addr = listener.local_addr()?;
    info!(%addr, started = %Local::now().format("%d-%m-%Y %H:%M:%S"), "dashboard listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
