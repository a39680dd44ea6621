use std::sync::Arc;

use github_activity_client::config::Config;
use metrics_exporter_prometheus::PrometheusBuilder;
use portfolio_activity::ActivityBoard;
use portfolio_activity::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Configure logging from env var `PORTFOLIO_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("PORTFOLIO_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env.clone())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!(%log_env, "portfolio_activity: log filter");

    let handle = PrometheusBuilder::new().install_recorder()?;

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration; aborting startup");
            std::process::exit(1);
        }
    };
    let addr = server::listen_addr(std::env::var("ADDRESS").ok().as_deref())?;

    let board = Arc::new(ActivityBoard::from_config(&config)?);
    tracing::info!(
        identity = board.identity(),
        page_size = config.repo_page_size,
        "portfolio_activity: initial refresh"
    );
    let _initial = board.spawn_refresh();

    let state = Arc::new(AppState {
        board,
        metrics: Some(handle),
    });
    server::serve(addr, server::router(state)).await?;

    Ok(())
}
