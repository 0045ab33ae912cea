use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryPostRepository;
pub use postgres::PgPostRepository;
pub use repository::{PostRepository, SharedPostRepository};

pub type DatabasePool = Pool<Postgres>;

pub async fn setup_database(database_url: &str, max_connections: u32) -> Result<DatabasePool> {
    info!("Connecting to database (max_connections={})", max_connections);

    let ssl_mode = if database_url.contains("sslmode=require")
        || database_url.contains("sslmode=verify-ca")
        || database_url.contains("sslmode=verify-full")
    {
        "SSL enabled"
    } else {
        warn!("Database connection does not enforce SSL; add sslmode=require to the URL");
        "SSL not enforced"
    };
    info!("Database SSL mode: {}", ssl_mode);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Duration::from_secs(180))
        .max_lifetime(Duration::from_secs(900))
        .test_before_acquire(true)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("SET timezone = 'UTC'").execute(&mut *conn).await?;
                sqlx::query("SET statement_timeout = '15s'")
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    let start_time = std::time::Instant::now();
    sqlx::query("SELECT 1").execute(&pool).await?;
    info!(
        "✅ Database connection established successfully in {:?}",
        start_time.elapsed()
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Open the post store selected by `config.database_url`, migrating Postgres first.
pub async fn open_repository(config: &Config) -> Result<SharedPostRepository> {
    let backend = config.store_backend()?;
    info!(store = %backend, "Opening post store");

    match backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryPostRepository::new())),
        StoreBackend::Postgres(url) => {
            let pool = setup_database(&url, config.max_connections).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgPostRepository::new(pool)))
        }
    }
}
