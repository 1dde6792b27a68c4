//! Object store upload (S3 and S3-compatible)

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::types::Artifact;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Uploads snapshot files to a bucket
///
/// An S3 client is built per upload from [`StoreConfig`] unless a store
/// was injected with [`Uploader::with_store`].
#[derive(Debug, Clone)]
pub struct Uploader {
    config: StoreConfig,
    store: Option<Arc<dyn ObjectStore>>,
}

impl Uploader {
    /// Create an uploader backed by S3
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Create an uploader that writes into the given store
    ///
    /// The bucket is still required to be configured.
    pub fn with_store(config: StoreConfig, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config,
            store: Some(store),
        }
    }

    /// Get the store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Destination key for a file name
    ///
    /// Format: `{key_prefix}/{file_name}`, e.g. `raw/api_snapshot_20240101T000000.parquet`
    pub fn object_key(&self, file_name: &str) -> String {
        let prefix = self.config.key_prefix.trim_matches('/');
        if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{prefix}/{file_name}")
        }
    }

    /// Upload an artifact to the configured bucket under its object key
    pub async fn upload_artifact(&self, artifact: &Artifact) -> Result<String> {
        let key = self.object_key(&artifact.file_name);
        self.upload(&artifact.path, self.config.bucket.as_deref(), &key)
            .await
    }

    /// Upload a local file to `bucket` at `key`
    ///
    /// Fails with a config error before touching the file or the network
    /// when `bucket` is unset or empty.
    pub async fn upload(&self, local: &Path, bucket: Option<&str>, key: &str) -> Result<String> {
        let bucket = bucket
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::config("S3_BUCKET not set"))?;

        if !local.exists() {
            return Err(Error::FileNotFound {
                path: local.display().to_string(),
            });
        }

        let destination = format!("s3://{bucket}/{key}");
        info!("Uploading to {destination} ...");

        let store = self.store_for(bucket)?;
        let data = tokio::fs::read(local)
            .await
            .map_err(|e| Error::transfer(format!("Failed to read {}: {e}", local.display())))?;

        store
            .put(&ObjectPath::from(key), bytes::Bytes::from(data).into())
            .await?;

        info!("Upload complete: {destination}");
        Ok(destination)
    }

    /// Resolve the store for a bucket
    fn store_for(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        if let Some(store) = &self.store {
            return Ok(Arc::clone(store));
        }

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(&self.config.region);

        if let Some(key_id) = &self.config.access_key_id {
            builder = builder.with_access_key_id(key_id);
        }
        if let Some(secret) = &self.config.secret_access_key {
            builder = builder.with_secret_access_key(secret);
        }
        // S3-compatible services (MinIO, R2, LocalStack)
        if let Some(endpoint) = &self.config.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create S3 client: {e}")))?;

        Ok(Arc::new(store))
    }
}
