use std::sync::Arc;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{MemoryStore, PgStore, ResponseStore};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn init_pool(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Pick the store for this process: Postgres when a connection string is
/// configured, otherwise the in-memory fallback.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn ResponseStore>, AppError> {
    match &config.database_url {
        Some(url) => {
            let pool = init_pool(url).await?;
            run_migrations(&pool).await?;
            log::info!("Using Postgres response store");
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            log::warn!("Using in-memory response store (development only)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
