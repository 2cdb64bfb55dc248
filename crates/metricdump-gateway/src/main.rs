//! metricdump gateway
//!
//! - HTTP endpoint: /fetch-all-metrics?projectKey=...
//! - Ops: /healthz, /readyz, /metrics
//! - Config: `metricdump.yaml` or the path given as first argument
//! - Graceful shutdown on Ctrl-C / SIGTERM (readiness flips to draining first)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metricdump_core::error::{MetricDumpError, Result};
use metricdump_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(code = e.client_code().as_str(), error = %e, "metricdump-gateway stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;
    tracing::info!(config = %path, upstream = ?cfg.upstream, output = %cfg.output.dir, "config loaded");

    let state = AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "metricdump-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricDumpError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| MetricDumpError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    state.set_draining();
    tracing::info!("signal received, starting graceful shutdown");
}
