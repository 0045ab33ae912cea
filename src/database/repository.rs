//! Repository abstraction over the post store.
//!
//! Handlers only see [`PostRepository`]; the concrete store (Postgres or
//! in-memory) is picked at startup from `DATABASE_URL`.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{NewPost, Post};

/// Shared handle to whichever store the service runs against.
pub type SharedPostRepository = Arc<dyn PostRepository>;

/// Data access for post records
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Short store name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// All posts in store order
    async fn find_all(&self) -> Result<Vec<Post>, ApiError>;

    /// Find a post by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError>;

    /// Create a post, assigning `id` and `created`
    async fn create(&self, post: NewPost) -> Result<Post, ApiError>;

    /// Create many posts at once, preserving input order
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, ApiError>;

    /// Overwrite author, title and content. Returns `false` when `id` is absent.
    async fn replace(&self, id: Uuid, post: NewPost) -> Result<bool, ApiError>;

    /// Delete a post. Returns `false` when `id` is absent.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Count all posts
    async fn count(&self) -> Result<i64, ApiError>;

    /// Remove every post. Used by test teardown and reseeding.
    async fn drop_all(&self) -> Result<u64, ApiError>;

    /// Cheap round trip to confirm the store is reachable
    async fn ping(&self) -> Result<(), ApiError>;
}
