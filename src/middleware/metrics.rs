use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Metrics middleware that tracks request metrics
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    // Route template keeps label cardinality bounded (`/posts/{id}`, not every id)
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone())
        .increment(1);
    gauge!("http_requests_in_flight", "path" => path.clone()).increment(1.0);

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let duration = start.elapsed();

    gauge!("http_requests_in_flight", "path" => path.clone()).decrement(1.0);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .record(duration.as_secs_f64());

    counter!(
        "http_responses_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    if response.status().is_server_error() {
        counter!(
            "http_errors_total",
            "method" => method,
            "path" => path,
            "status" => status
        )
        .increment(1);
    }

    response
}

/// Track database operations
pub fn track_database_operation(operation: &str, duration_ms: f64, success: bool) {
    histogram!(
        "database_operation_duration_ms",
        "operation" => operation.to_string(),
        "success" => success.to_string()
    )
    .record(duration_ms);

    counter!(
        "database_operations_total",
        "operation" => operation.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
}

/// Track post lifecycle events (created, replaced, deleted, seeded)
pub fn track_post_event(event: &'static str, count: u64) {
    counter!("posts_events_total", "event" => event).increment(count);
}
