//! Application state shared across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::database::SharedPostRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Post store (Postgres or in-memory)
    pub posts: SharedPostRepository,
    /// Application configuration
    pub config: Config,
    /// Prometheus render handle, present when the recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(posts: SharedPostRepository, config: Config) -> Self {
        Self {
            posts,
            config,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

impl axum::extract::FromRef<AppState> for SharedPostRepository {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.posts.clone()
    }
}
