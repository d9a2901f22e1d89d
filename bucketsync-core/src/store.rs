//! Object storage abstraction.
//!
//! The sync engine only ever needs three remote operations: page through
//! keys, upload a file, and delete a batch. Keeping them behind a trait
//! lets tests run the whole pipeline against an in-memory store.

use crate::error::SyncResult;
use async_trait::async_trait;
use std::path::Path;

/// One page of a remote listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectPage {
    /// Keys on this page, in the provider's listing order.
    pub keys: Vec<String>,
    /// Continuation marker for the next page, when the provider supplies one.
    pub next_marker: Option<String>,
    /// Whether more pages follow this one.
    pub is_truncated: bool,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Confirms the backing bucket is reachable. Called once per run,
    /// after the module gate and before anything else touches the
    /// store. The default is a no-op for stores with nothing to check.
    async fn verify(&self) -> SyncResult<()> {
        Ok(())
    }

    /// Lists up to `max_keys` keys starting after `marker`, scoped to
    /// `prefix` (empty string means the whole bucket).
    async fn list_page(
        &self,
        prefix: &str,
        marker: Option<&str>,
        max_keys: i32,
    ) -> SyncResult<ObjectPage>;

    /// Uploads the file at `local_path` under `key`, replacing any
    /// existing object.
    async fn put_file(&self, key: &str, local_path: &Path) -> SyncResult<()>;

    /// Deletes `keys` in a single request and returns the keys the
    /// provider confirmed deleted.
    async fn delete_batch(&self, keys: &[String]) -> SyncResult<Vec<String>>;
}
