//! S3-compatible implementation of [`ObjectStore`].
//!
//! Talks to any endpoint speaking the S3 API (MinIO, Aliyun OSS, AWS)
//! using static credentials and path-style addressing.

use crate::config::{RemotePath, SyncConfig};
use crate::error::{SyncError, SyncResult};
use crate::store::{ObjectPage, ObjectStore};
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_types::region::Region;
use std::path::Path;
use tracing::{debug, warn};

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Builds a client from the run configuration. The bucket name comes
    /// from the remote path; the sub-prefix stays with the caller.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        let remote = RemotePath::parse(&config.remote_path)?;
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.access_key_secret,
            None,
            None,
            "bucketsync-config",
        );
        let s3_config = aws_sdk_s3::Config::builder()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .behavior_version_latest()
            .endpoint_url(&config.endpoint)
            .force_path_style(true)
            .build();
        Ok(Self {
            client: S3Client::from_conf(s3_config),
            bucket: remote.bucket,
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    /// Heads the bucket so a bad endpoint or credentials fail the run
    /// before any listing starts.
    async fn verify(&self) -> SyncResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                SyncError::Storage(format!("bucket {} is not reachable: {e}", self.bucket))
            })?;
        debug!("bucket {} is reachable", self.bucket);
        Ok(())
    }

    async fn list_page(
        &self,
        prefix: &str,
        marker: Option<&str>,
        max_keys: i32,
    ) -> SyncResult<ObjectPage> {
        let mut request = self
            .client
            .list_objects()
            .bucket(&self.bucket)
            .max_keys(max_keys);
        if !prefix.is_empty() {
            request = request.prefix(prefix);
        }
        if let Some(marker) = marker {
            request = request.marker(marker);
        }

        let response = request.send().await.map_err(|e| {
            SyncError::Storage(format!("list failed for bucket {}: {e}", self.bucket))
        })?;

        let keys: Vec<String> = response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();
        // Some providers omit NextMarker on truncated pages; the last key
        // of the page is the documented fallback.
        let next_marker = response
            .next_marker()
            .map(str::to_string)
            .or_else(|| keys.last().cloned());

        Ok(ObjectPage {
            keys,
            next_marker,
            is_truncated: response.is_truncated().unwrap_or(false),
        })
    }

    async fn put_file(&self, key: &str, local_path: &Path) -> SyncResult<()> {
        let body = ByteStream::from_path(local_path).await.map_err(|e| {
            SyncError::Storage(format!(
                "cannot read {} for upload: {e}",
                local_path.display()
            ))
        })?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| SyncError::Storage(format!("upload failed for {key}: {e}")))?;
        debug!("uploaded {} as {key}", local_path.display());
        Ok(())
    }

    async fn delete_batch(&self, keys: &[String]) -> SyncResult<Vec<String>> {
        let mut objects = Vec::with_capacity(keys.len());
        for key in keys {
            let id = ObjectIdentifier::builder()
                .key(key)
                .build()
                .map_err(|e| SyncError::Storage(format!("invalid delete key {key}: {e}")))?;
            objects.push(id);
        }
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| SyncError::Storage(format!("cannot build delete request: {e}")))?;

        let response = self
            .client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                SyncError::Storage(format!("delete failed for bucket {}: {e}", self.bucket))
            })?;

        for err in response.errors() {
            warn!(
                "provider refused delete for {}: {}",
                err.key().unwrap_or("<unknown key>"),
                err.message().unwrap_or("no detail")
            );
        }

        Ok(response
            .deleted()
            .iter()
            .filter_map(|d| d.key().map(str::to_string))
            .collect())
    }
}
