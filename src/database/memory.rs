//! In-memory post store.
//!
//! Keeps posts in insertion order behind an async `RwLock`. Used for local
//! development (`DATABASE_URL=memory://`) and by the test harness.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::repository::PostRepository;
use crate::error::ApiError;
use crate::models::{NewPost, Post};

#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn materialize(post: NewPost) -> Post {
        Post {
            id: Uuid::new_v4(),
            author: post.author,
            title: post.title,
            content: post.content,
            created: Utc::now(),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self) -> Result<Vec<Post>, ApiError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn create(&self, post: NewPost) -> Result<Post, ApiError> {
        let post = Self::materialize(post);
        self.posts.write().await.push(post.clone());
        debug!(post_id = %post.id, "Stored post in memory");
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, ApiError> {
        let created: Vec<Post> = posts.into_iter().map(Self::materialize).collect();
        self.posts.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    async fn replace(&self, id: Uuid, post: NewPost) -> Result<bool, ApiError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                existing.author = post.author;
                existing.title = post.title;
                existing.content = post.content;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        Ok(posts.len() != before)
    }

    async fn count(&self) -> Result<i64, ApiError> {
        Ok(self.posts.read().await.len() as i64)
    }

    async fn drop_all(&self) -> Result<u64, ApiError> {
        let mut posts = self.posts.write().await;
        let removed = posts.len() as u64;
        posts.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
