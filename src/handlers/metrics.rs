// Metrics endpoint for Prometheus

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, AppState};

/// Prometheus metrics endpoint
///
/// # Errors
///
/// Returns 404 when the Prometheus recorder was not installed at startup
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain"),
        (status = 404, description = "Metrics exporter disabled")
    )
)]
pub async fn get_prometheus_metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let handle = state
        .metrics_handle
        .as_ref()
        .ok_or_else(|| ApiError::not_found("Metrics exporter"))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response())
}
