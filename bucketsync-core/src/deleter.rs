//! Stale object deletion.
//!
//! Deletion candidates are split into capped batches and issued
//! sequentially. A failed batch is recorded and the remaining batches
//! still run, so one bad request cannot strand every stale object.

use crate::store::ObjectStore;
use tracing::{debug, info, warn};

/// Maximum keys per delete request.
pub const DELETE_BATCH_SIZE: usize = 50;

/// Outcome of the delete phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Keys confirmed deleted, in request order.
    pub deleted: Vec<String>,
    /// Batches whose delete request failed outright.
    pub failures: Vec<BatchFailure>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchFailure {
    /// Zero-based index of the failed batch.
    pub batch: usize,
    pub detail: String,
}

/// Splits `keys` into chunks of at most `cap` entries, preserving order.
/// A cap of zero disables splitting and yields a single chunk.
pub fn chunk_keys(keys: &[String], cap: usize) -> Vec<Vec<String>> {
    if keys.is_empty() {
        return Vec::new();
    }
    if cap == 0 || keys.len() <= cap {
        return vec![keys.to_vec()];
    }
    keys.chunks(cap).map(|chunk| chunk.to_vec()).collect()
}

/// Deletes `keys` in batches of at most `cap`, continuing past failed
/// batches. The report carries both the confirmed deletions and the
/// failures, in batch order.
pub async fn delete_in_batches(
    store: &dyn ObjectStore,
    keys: &[String],
    cap: usize,
) -> DeleteReport {
    let mut report = DeleteReport::default();
    let chunks = chunk_keys(keys, cap);
    if chunks.is_empty() {
        return report;
    }

    info!(
        "deleting {} stale objects in {} batches",
        keys.len(),
        chunks.len()
    );
    for (index, chunk) in chunks.iter().enumerate() {
        match store.delete_batch(chunk).await {
            Ok(deleted) => {
                debug!("batch {index}: deleted {} objects", deleted.len());
                report.deleted.extend(deleted);
            }
            Err(err) => {
                warn!(
                    "delete batch {index} failed: {err} ({} objects deleted so far)",
                    report.deleted.len()
                );
                report.failures.push(BatchFailure {
                    batch: index,
                    detail: err.to_string(),
                });
            }
        }
    }
    report
}
