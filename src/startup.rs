//! Application startup, serving and shutdown.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{Config, LogFormat};
use crate::database;
use crate::router::build_router;

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blog_api=debug,tower_http=debug".into());

    let result = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    // A second init (e.g. several test servers in one process) is not an error
    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Open the store and build the shared application state.
pub async fn initialize_app(config: &Config) -> Result<AppState> {
    info!(
        environment = %config.environment,
        "🚀 Starting blog API"
    );

    let posts = database::open_repository(config)
        .await
        .context("Failed to open post store")?;
    info!("✅ Post store ready ({})", posts.backend_name());

    let mut app_state = AppState::new(posts, config.clone());

    if config.metrics_enabled {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
        app_state = app_state.with_metrics(handle);
        info!("✅ Prometheus metrics initialized");
    }

    Ok(app_state)
}

/// A server running on a background task.
pub struct RunningServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Base URL for HTTP clients, e.g. `http://127.0.0.1:54321`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections, drain in-flight requests and wait for exit.
    pub async fn close(mut self) -> Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        (&mut self.task)
            .await
            .context("Server task panicked")?
            .context("Server exited with an error")?;
        info!(addr = %self.addr, "Server closed");
        Ok(())
    }
}

/// Bind `config.bind_address()` and serve the app until [`RunningServer::close`].
pub async fn run_server(app_state: AppState) -> Result<RunningServer> {
    let bind_address = app_state.config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    let addr = listener.local_addr()?;
    let app = build_router(app_state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    info!("Listening on {}", addr);
    Ok(RunningServer {
        addr,
        shutdown: Some(shutdown_tx),
        task,
    })
}

/// Wait for shutdown signal.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
