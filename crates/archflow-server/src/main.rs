//! Service entry point.

use archflow::ServiceConfig;
use archflow_anthropic::AnthropicSpecGenerator;
use archflow_server::{artifacts, build_router, sessions, AppState};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tokio::fs::create_dir_all(&config.output_dir).await?;

    let generator = Arc::new(AnthropicSpecGenerator::try_new()?);
    let state = AppState::new(config.clone(), generator)?;

    let session_sweeper = sessions::spawn_sweeper(
        Arc::clone(&state.sessions),
        config.session_sweep_interval,
    );
    let artifact_sweeper = artifacts::spawn_sweeper(
        config.output_dir.clone(),
        config.artifact_ttl,
        config.artifact_sweep_interval,
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        output_dir = %config.output_dir.display(),
        "archflow server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    session_sweeper.abort();
    artifact_sweeper.abort();
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install ctrl-c handler; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
