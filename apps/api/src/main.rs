mod analysis;
mod config;
mod errors;
mod resume_file;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{KeywordAnalyzer, ReadinessAnalyzer};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RoleAudit API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = Arc::new(KeywordAnalyzer);
    info!(backend = analyzer.backend(), "Readiness analyzer initialized");

    let state = AppState {
        config: config.clone(),
        analyzer,
    };

    let mut app = build_router(state).layer(TraceLayer::new_for_http());
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
