pub mod postgres;
pub mod migrations;
pub mod repositories;
pub mod gateway;
pub mod storage;
pub mod memory;

pub use postgres::{PostgresPool, create_postgres_pool, health_check as postgres_health_check};
pub use repositories::*;
pub use gateway::{BlobStore, ResultStore};
pub use storage::{LocalBlobStore, SupabaseBlobStore};
pub use memory::{InMemoryBlobStore, InMemoryResultStore};

use anyhow::Result;
use std::sync::Arc;

use pricecheck_utils::{DatabaseConfig, PriceCheckResult, StorageBackend, StorageConfig};

pub async fn initialize_database(config: &DatabaseConfig) -> Result<PostgresPool> {
    let pool = create_postgres_pool(config).await?;

    if config.run_migrations {
        migrations::run_postgres_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Build the blob store selected by `storage.backend`.
pub fn create_blob_store(config: &StorageConfig) -> PriceCheckResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.backend {
        StorageBackend::Supabase => Arc::new(SupabaseBlobStore::new(config)?),
        StorageBackend::Local => Arc::new(LocalBlobStore::new(&config.local_root)),
    };
    tracing::info!(backend = ?config.backend, bucket = %config.bucket, "Blob store configured");
    Ok(store)
}
