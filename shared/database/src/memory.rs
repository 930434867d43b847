//! In-memory gateway implementations for tests and dry runs.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::gateway::{BlobStore, ResultStore};
use pricecheck_models::{NewPriceResult, PriceResult};
use pricecheck_utils::{PriceCheckError, PriceCheckResult};

#[derive(Default)]
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.objects.get_mut().insert(path.into(), data.into());
        self
    }

    pub async fn put(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.objects.write().await.insert(path.into(), data.into());
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn download(&self, path: &str) -> PriceCheckResult<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| PriceCheckError::persistence(format!("Download failed: {} not found", path)))
    }
}

/// Result store that keeps inserted records in insertion order.
#[derive(Default)]
pub struct InMemoryResultStore {
    records: RwLock<Vec<PriceResult>>,
    fail_after: Option<usize>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `successful` inserts, then fail every insert after that.
    pub fn failing_after(successful: usize) -> Self {
        Self {
            records: RwLock::default(),
            fail_after: Some(successful),
        }
    }

    pub async fn records(&self) -> Vec<PriceResult> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn insert(&self, record: &NewPriceResult) -> PriceCheckResult<PriceResult> {
        let mut records = self.records.write().await;
        if self.fail_after.is_some_and(|limit| records.len() >= limit) {
            return Err(PriceCheckError::persistence("Insert rejected by result store"));
        }

        let stored = PriceResult::from_new(record.clone());
        records.push(stored.clone());
        Ok(stored)
    }
}
