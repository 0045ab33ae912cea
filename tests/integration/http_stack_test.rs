//! Router behaviour when the store misbehaves: slow queries and failed pings.

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use blog_api::config::Config;
use blog_api::database::{PostRepository, SharedPostRepository};
use blog_api::error::ApiError;
use blog_api::models::{NewPost, Post};
use blog_api::router::build_router;
use blog_api::AppState;

/// Store whose reads stall for `delay` and whose ping always fails.
struct StalledStore {
    delay: Duration,
}

impl StalledStore {
    fn unreachable() -> ApiError {
        ApiError::Database(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl PostRepository for StalledStore {
    fn backend_name(&self) -> &'static str {
        "stalled"
    }

    async fn find_all(&self) -> Result<Vec<Post>, ApiError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, ApiError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn create(&self, _post: NewPost) -> Result<Post, ApiError> {
        Err(Self::unreachable())
    }

    async fn insert_many(&self, _posts: Vec<NewPost>) -> Result<Vec<Post>, ApiError> {
        Err(Self::unreachable())
    }

    async fn replace(&self, _id: Uuid, _post: NewPost) -> Result<bool, ApiError> {
        Err(Self::unreachable())
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, ApiError> {
        Err(Self::unreachable())
    }

    async fn count(&self) -> Result<i64, ApiError> {
        Err(Self::unreachable())
    }

    async fn drop_all(&self) -> Result<u64, ApiError> {
        Err(Self::unreachable())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Err(Self::unreachable())
    }
}

fn stalled_state(delay: Duration, request_timeout: u64) -> AppState {
    let config = Config {
        database_url: "memory://".to_string(),
        request_timeout,
        ..Config::for_tests()
    };
    let posts: SharedPostRepository = Arc::new(StalledStore { delay });
    AppState::new(posts, config)
}

async fn get(state: AppState, uri: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    let response = build_router(state).oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

#[tokio::test]
async fn test_slow_store_times_out_with_408() -> Result<()> {
    let state = stalled_state(Duration::from_secs(10), 1);

    let (status, _) = get(state, "/posts").await?;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    Ok(())
}

#[tokio::test]
async fn test_failed_ping_reports_degraded_health() -> Result<()> {
    let state = stalled_state(Duration::ZERO, 30);

    let (status, body) = get(state, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["dependencies"][0]["name"], "stalled");
    assert_eq!(body["dependencies"][0]["status"], "unhealthy");
    Ok(())
}

#[tokio::test]
async fn test_store_failure_hides_details() -> Result<()> {
    let state = stalled_state(Duration::ZERO, 30);
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/posts/{}", Uuid::new_v4()))
        .body(Body::empty())?;

    let response = build_router(state).oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await?.to_bytes();
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["error"]["code"], "DB_7001");
    assert!(body["error"].get("details").is_none());
    Ok(())
}
