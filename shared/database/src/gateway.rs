//! Persistence gateway seams consumed by the price job.

use async_trait::async_trait;

use pricecheck_models::{NewPriceResult, PriceResult};
use pricecheck_utils::PriceCheckResult;

/// Object storage addressed by path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fails with a persistence error when the object is missing or inaccessible.
    async fn download(&self, path: &str) -> PriceCheckResult<Vec<u8>>;
}

/// Append-only store for price results. Insert is the only operation.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn insert(&self, record: &NewPriceResult) -> PriceCheckResult<PriceResult>;
}
