//! Blob store backends.

use async_trait::async_trait;
use reqwest::Client;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::gateway::BlobStore;
use pricecheck_utils::{PriceCheckError, PriceCheckResult, StorageConfig};

/// Supabase storage bucket accessed with the service key.
pub struct SupabaseBlobStore {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseBlobStore {
    pub fn new(config: &StorageConfig) -> PriceCheckResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(|e| {
            PriceCheckError::configuration(format!("Failed to create storage client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            bucket: config.bucket.clone(),
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl BlobStore for SupabaseBlobStore {
    async fn download(&self, path: &str) -> PriceCheckResult<Vec<u8>> {
        let response = self
            .client
            .get(self.object_url(path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| PriceCheckError::persistence(format!("Download failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceCheckError::persistence(format!(
                "Download failed: {} returned {}",
                path, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PriceCheckError::persistence(format!("Download failed: {}", e)))?;

        tracing::debug!(path, bucket = %self.bucket, size = bytes.len(), "Downloaded upload");
        Ok(bytes.to_vec())
    }
}

/// Directory on the local filesystem, for development and the CLI.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn download(&self, path: &str) -> PriceCheckResult<Vec<u8>> {
        let relative = Path::new(path);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(PriceCheckError::persistence(format!(
                "Download failed: invalid path '{}'",
                path
            )));
        }

        tokio::fs::read(self.root.join(relative))
            .await
            .map_err(|e| PriceCheckError::persistence(format!("Download failed: {}: {}", path, e)))
    }
}
