use utoipa::OpenApi;

use crate::error::{ErrorCode, ErrorDetail, ErrorResponse};
use crate::handlers::{health, metrics, posts};
use crate::models::{Author, BlogpostsEnvelope, CreatePostRequest, PostResponse, UpdatePostRequest};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(title = "Blog API", version = "0.1.0", description = "CRUD API for blog posts"),
    paths(
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        posts::list_blogposts,
        health::health_check,
        metrics::get_prometheus_metrics,
    ),
    components(schemas(
        Author,
        PostResponse,
        CreatePostRequest,
        UpdatePostRequest,
        BlogpostsEnvelope,
        ErrorResponse,
        ErrorDetail,
        ErrorCode,
        health::HealthStatus,
        health::ServiceHealth,
    )),
    tags(
        (name = "posts", description = "Blog post resource"),
        (name = "blogposts", description = "Legacy collection shape"),
        (name = "health", description = "Service health"),
        (name = "metrics", description = "Prometheus metrics")
    )
)]
pub struct ApiDoc;
