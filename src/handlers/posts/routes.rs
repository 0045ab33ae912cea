//! Route builders for the posts resource.

use axum::{routing::get, Router};

use super::{create_post, delete_post, get_post, list_blogposts, list_posts, update_post};
use crate::AppState;

/// Build posts routes: GET/POST /posts, GET/PUT/DELETE /posts/{id}
pub fn posts_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}

/// Build legacy blogposts routes; only the list shape differs from `/posts`
pub fn blogposts_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogposts).post(create_post))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}
