//! Postgres-backed post store.
//!
//! The author is kept as a JSONB document (`{"firstName", "lastName"}`), the
//! rest of the record as plain columns. `seq` gives a stable store order.

use async_trait::async_trait;
use sqlx::types::Json;
use std::future::Future;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::repository::PostRepository;
use super::DatabasePool;
use crate::error::ApiError;
use crate::middleware::metrics::track_database_operation;
use crate::models::{NewPost, Post, PostDb};

const SELECT_POST: &str = "SELECT id, author, title, content, created FROM posts";

#[derive(Clone)]
pub struct PgPostRepository {
    pool: DatabasePool,
}

impl PgPostRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Run a query and record its duration and outcome.
async fn timed<T, F>(operation: &'static str, query: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let start = Instant::now();
    let result = query.await;
    track_database_operation(
        operation,
        start.elapsed().as_secs_f64() * 1000.0,
        result.is_ok(),
    );
    result.map_err(ApiError::from)
}

#[async_trait]
impl PostRepository for PgPostRepository {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_all(&self) -> Result<Vec<Post>, ApiError> {
        let sql = format!("{} ORDER BY seq ASC", SELECT_POST);
        let rows = timed(
            "posts.find_all",
            sqlx::query_as::<_, PostDb>(&sql).fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        let sql = format!("{} WHERE id = $1", SELECT_POST);
        let row = timed(
            "posts.find_by_id",
            sqlx::query_as::<_, PostDb>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Post::from))
    }

    async fn create(&self, post: NewPost) -> Result<Post, ApiError> {
        let row = timed(
            "posts.create",
            sqlx::query_as::<_, PostDb>(
                "INSERT INTO posts (id, author, title, content)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, author, title, content, created",
            )
            .bind(Uuid::new_v4())
            .bind(Json(&post.author))
            .bind(&post.title)
            .bind(&post.content)
            .fetch_one(&self.pool),
        )
        .await?;

        debug!(post_id = %row.id, "Inserted post");
        Ok(row.into())
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, ApiError> {
        let start = Instant::now();
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(posts.len());

        for post in posts {
            let row = sqlx::query_as::<_, PostDb>(
                "INSERT INTO posts (id, author, title, content)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, author, title, content, created",
            )
            .bind(Uuid::new_v4())
            .bind(Json(&post.author))
            .bind(&post.title)
            .bind(&post.content)
            .fetch_one(&mut *tx)
            .await?;
            created.push(Post::from(row));
        }

        tx.commit().await?;
        track_database_operation(
            "posts.insert_many",
            start.elapsed().as_secs_f64() * 1000.0,
            true,
        );
        Ok(created)
    }

    async fn replace(&self, id: Uuid, post: NewPost) -> Result<bool, ApiError> {
        let result = timed(
            "posts.replace",
            sqlx::query("UPDATE posts SET author = $2, title = $3, content = $4 WHERE id = $1")
                .bind(id)
                .bind(Json(&post.author))
                .bind(&post.title)
                .bind(&post.content)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = timed(
            "posts.delete",
            sqlx::query("DELETE FROM posts WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, ApiError> {
        timed(
            "posts.count",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts").fetch_one(&self.pool),
        )
        .await
    }

    async fn drop_all(&self) -> Result<u64, ApiError> {
        let result = timed(
            "posts.drop_all",
            sqlx::query("DELETE FROM posts").execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        timed("ping", sqlx::query("SELECT 1").execute(&self.pool)).await?;
        Ok(())
    }
}
