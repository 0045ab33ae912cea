//! Shared harness: an in-process server backed by a fresh in-memory store.
#![allow(dead_code)]

use anyhow::Result;
use std::sync::Arc;

use blog_api::config::Config;
use blog_api::database::{InMemoryPostRepository, SharedPostRepository};
use blog_api::fixtures::generate_posts;
use blog_api::models::Post;
use blog_api::startup::{run_server, RunningServer};
use blog_api::AppState;

pub const SEEDED_POSTS: usize = 10;

/// App state over an empty in-memory store, without binding a socket.
pub fn memory_state() -> AppState {
    let config = Config {
        database_url: "memory://".to_string(),
        ..Config::for_tests()
    };
    let posts: SharedPostRepository = Arc::new(InMemoryPostRepository::new());
    AppState::new(posts, config)
}

/// Seed the store with [`SEEDED_POSTS`] generated posts.
pub async fn seed(posts: &SharedPostRepository) -> Result<Vec<Post>> {
    Ok(posts.insert_many(generate_posts(SEEDED_POSTS)).await?)
}

pub struct TestApp {
    pub server: RunningServer,
    pub posts: SharedPostRepository,
    pub seeded: Vec<Post>,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Start a server on an ephemeral port with ten seeded posts.
    pub async fn spawn() -> Result<Self> {
        let state = memory_state();
        let posts = state.posts.clone();
        let seeded = seed(&posts).await?;
        let server = run_server(state).await?;

        Ok(Self {
            server,
            posts,
            seeded,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.url(), path)
    }

    /// Empty the store and stop the server.
    pub async fn teardown(self) -> Result<()> {
        let TestApp {
            server,
            posts,
            client,
            ..
        } = self;
        drop(client);
        posts.drop_all().await?;
        server.close().await
    }
}
