use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use blog_api::config::Config;
use blog_api::router::build_router;
use blog_api::startup::{init_tracing, initialize_app, shutdown_signal};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (.env first, then process environment)
    let config = Config::from_env()?;
    init_tracing(&config);
    info!("Loaded configuration for environment: {}", config.environment);

    let app_state = initialize_app(&config).await?;
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    info!("🚀 Blog API listening on http://{}", addr);
    info!("📖 API docs at http://{}/api/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
