mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use blog_api::database::SharedPostRepository;
use blog_api::models::Author;
use blog_api::router::build_router;
use common::{memory_state, seed, SEEDED_POSTS};

async fn seeded_router() -> Result<(Router, SharedPostRepository)> {
    let state = memory_state();
    let posts = state.posts.clone();
    seed(&posts).await?;
    Ok((build_router(state), posts))
}

async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

fn get(uri: &str) -> Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

#[tokio::test]
async fn test_blogposts_wraps_collection() -> Result<()> {
    let (router, _posts) = seeded_router().await?;

    let (status, body) = send(router, get("/blogposts")?).await?;
    assert_eq!(status, StatusCode::OK);

    let items = body["blogposts"].as_array().expect("blogposts should be an array");
    assert_eq!(items.len(), SEEDED_POSTS);
    for item in items {
        assert!(item["created"].is_string());
        assert!(item["author"].is_string());
    }
    Ok(())
}

#[tokio::test]
async fn test_blogposts_and_posts_list_the_same_records() -> Result<()> {
    let (router, _posts) = seeded_router().await?;

    let (_, legacy) = send(router.clone(), get("/blogposts")?).await?;
    let (_, flat) = send(router, get("/posts")?).await?;

    assert_eq!(legacy["blogposts"], flat);
    Ok(())
}

#[tokio::test]
async fn test_blogposts_create_and_delete() -> Result<()> {
    let (router, posts) = seeded_router().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/blogposts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "title": "Legacy",
                "author": { "firstName": "Ada", "lastName": "Lovelace" },
                "content": "Posted through the old route"
            })
            .to_string(),
        ))?;
    let (status, body) = send(router.clone(), request).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], "Ada Lovelace");

    let id = body["id"].as_str().expect("id should be a string").to_string();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/blogposts/{}", id))
        .body(Body::empty())?;
    let (status, _) = send(router, request).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(posts.count().await?, SEEDED_POSTS as i64);
    Ok(())
}

#[tokio::test]
async fn test_blogposts_get_by_id() -> Result<()> {
    let (router, posts) = seeded_router().await?;
    let target = posts.find_all().await?.remove(2);

    let (status, body) = send(router, get(&format!("/blogposts/{}", target.id))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], target.id.to_string());
    assert_eq!(body["title"], target.title);
    assert_eq!(body["author"], target.author.display_name());
    Ok(())
}

#[tokio::test]
async fn test_blogposts_update_replaces_record() -> Result<()> {
    let (router, posts) = seeded_router().await?;
    let target = posts.find_all().await?.remove(0);

    let request = Request::builder()
        .method(Method::PUT)
        .uri(format!("/blogposts/{}", target.id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "id": target.id,
                "title": "Rewritten",
                "author": { "firstName": "Grace", "lastName": "Hopper" },
                "content": "Replaced through the old route"
            })
            .to_string(),
        ))?;
    let (status, _) = send(router.clone(), request).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let stored = posts.find_by_id(target.id).await?.expect("post should remain");
    assert_eq!(stored.author, Author::new("Grace", "Hopper"));
    assert_eq!(stored.title, "Rewritten");
    assert_eq!(stored.content, "Replaced through the old route");

    let (status, body) = send(router, get(&format!("/blogposts/{}", target.id))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"], "Grace Hopper");
    assert_eq!(body["title"], "Rewritten");
    Ok(())
}

#[tokio::test]
async fn test_invalid_json_uses_error_envelope() -> Result<()> {
    let (router, _posts) = seeded_router().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = send(router, request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_3003");
    assert_eq!(body["error"]["code_number"], 3003);
    assert!(body["request_id"].is_string());
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_non_json_content_type_is_rejected() -> Result<()> {
    let (router, posts) = seeded_router().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(
            json!({
                "title": "Plain",
                "author": { "firstName": "Ada", "lastName": "Lovelace" },
                "content": "Sent as text"
            })
            .to_string(),
        ))?;
    let (status, body) = send(router, request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_3003");
    assert_eq!(posts.count().await?, SEEDED_POSTS as i64);
    Ok(())
}

#[tokio::test]
async fn test_unknown_post_is_not_found() -> Result<()> {
    let (router, _posts) = seeded_router().await?;

    let uri = format!("/posts/{}", uuid::Uuid::new_v4());
    let (status, body) = send(router, get(&uri)?).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RES_4001");
    Ok(())
}

#[tokio::test]
async fn test_health_reports_store() -> Result<()> {
    let (router, _posts) = seeded_router().await?;

    let (status, body) = send(router, get("/health")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn test_metrics_disabled_returns_not_found() -> Result<()> {
    let (router, _posts) = seeded_router().await?;

    let (status, _) = send(router, get("/metrics")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
