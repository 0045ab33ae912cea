//! Fill the configured post store with generated posts.
//!
//! Usage: `seed-posts [COUNT] [--reset]`. COUNT falls back to `SEED_COUNT`, then 10.

use anyhow::{anyhow, Context, Result};
use std::env;
use tracing::{info, warn};

use blog_api::config::{Config, StoreBackend};
use blog_api::database::open_repository;
use blog_api::fixtures::generate_posts;
use blog_api::middleware::metrics::track_post_event;
use blog_api::startup::init_tracing;

const DEFAULT_SEED_COUNT: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let mut count = None;
    let mut reset = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--reset" => reset = true,
            value => {
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| anyhow!("Invalid post count: {}", value))?;
                count = Some(parsed);
            }
        }
    }
    let count = match count {
        Some(count) => count,
        None => match env::var("SEED_COUNT") {
            Ok(value) => value.parse().context("SEED_COUNT must be a number")?,
            Err(_) => DEFAULT_SEED_COUNT,
        },
    };

    if config.store_backend()? == StoreBackend::Memory {
        warn!("DATABASE_URL points at the in-memory store; seeded posts are lost on exit");
    }

    let posts = open_repository(&config).await?;

    if reset {
        let removed = posts.drop_all().await?;
        info!("Removed {} existing posts", removed);
    }

    let inserted = posts.insert_many(generate_posts(count)).await?;
    track_post_event("seeded", inserted.len() as u64);
    let total = posts.count().await?;
    info!(
        "✅ Seeded {} posts into {} store ({} total)",
        inserted.len(),
        posts.backend_name(),
        total
    );

    Ok(())
}
