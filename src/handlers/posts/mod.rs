//! Posts resource handlers.
//!
//! `/posts` returns the collection as a bare array; the legacy `/blogposts`
//! collection wraps it as `{"blogposts": [...]}`. Every other operation is
//! shared between the two route families.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::database::SharedPostRepository;
use crate::error::{ApiError, ErrorCode, ErrorResponse, Result};
use crate::handlers::extractors::{ValidatedJson, ValidatedUuid};
use crate::handlers::response::{Created, NoContent};
use crate::middleware::metrics::track_post_event;
use crate::models::{BlogpostsEnvelope, CreatePostRequest, PostResponse, UpdatePostRequest};

pub mod routes;

pub use routes::{blogposts_routes, posts_routes};

/// List all posts in store order
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All stored posts", body = [PostResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_posts(
    State(posts): State<SharedPostRepository>,
) -> Result<Json<Vec<PostResponse>>> {
    let items = posts.find_all().await?;
    Ok(Json(items.into_iter().map(PostResponse::from).collect()))
}

/// List all posts wrapped in a `blogposts` envelope
#[utoipa::path(
    get,
    path = "/blogposts",
    tag = "blogposts",
    responses(
        (status = 200, description = "All stored posts", body = BlogpostsEnvelope),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_blogposts(
    State(posts): State<SharedPostRepository>,
) -> Result<Json<BlogpostsEnvelope>> {
    let items = posts.find_all().await?;
    Ok(Json(BlogpostsEnvelope {
        blogposts: items.into_iter().map(PostResponse::from).collect(),
    }))
}

/// Fetch a single post
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "No post with this ID", body = ErrorResponse)
    )
)]
pub async fn get_post(
    State(posts): State<SharedPostRepository>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>> {
    let id = ValidatedUuid::parse(&id)?;
    let post = posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post"))?;
    Ok(Json(post.into()))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
pub async fn create_post(
    State(posts): State<SharedPostRepository>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<Created<PostResponse>> {
    let post = posts.create(request.into()).await?;
    track_post_event("created", 1);
    info!(post_id = %post.id, "Created post");
    Ok(Created(post.into()))
}

/// Replace every field of a post
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID, must equal the body `id`")),
    request_body = UpdatePostRequest,
    responses(
        (status = 204, description = "Post replaced"),
        (status = 400, description = "Invalid body or path/body ID mismatch", body = ErrorResponse),
        (status = 404, description = "No post with this ID", body = ErrorResponse)
    )
)]
pub async fn update_post(
    State(posts): State<SharedPostRepository>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> Result<NoContent> {
    let id = ValidatedUuid::parse(&id)?;
    ensure_ids_match(id, request.id)?;

    if !posts.replace(id, request.into()).await? {
        return Err(ApiError::not_found("Post"));
    }
    track_post_event("replaced", 1);
    info!(post_id = %id, "Replaced post");
    Ok(NoContent)
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "No post with this ID", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    State(posts): State<SharedPostRepository>,
    Path(id): Path<String>,
) -> Result<NoContent> {
    let id = ValidatedUuid::parse(&id)?;
    if !posts.delete(id).await? {
        return Err(ApiError::not_found("Post"));
    }
    track_post_event("deleted", 1);
    info!(post_id = %id, "Deleted post");
    Ok(NoContent)
}

fn ensure_ids_match(path_id: Uuid, body_id: Uuid) -> Result<()> {
    if path_id != body_id {
        return Err(ApiError::validation_field(
            ErrorCode::InvalidInput,
            "id",
            format!(
                "Request path id ({}) and request body id ({}) must match",
                path_id, body_id
            ),
        ));
    }
    Ok(())
}
