//! Remote listing.
//!
//! Pages through the bucket and builds the pending-deletion key set the
//! reconciler works from. Any page failure aborts the run; a partial
//! listing would make the delete phase remove objects it never saw.

use crate::error::{SyncError, SyncResult};
use crate::keyset::RemoteKeySet;
use crate::store::ObjectStore;
use tracing::debug;

/// Page size for remote listings.
pub const LIST_PAGE_SIZE: i32 = 200;

/// Collects every key under `sub_prefix` (or the whole bucket when no
/// prefix is configured) into a [`RemoteKeySet`], all entries pending.
///
/// Providers match prefixes on raw key text, so a sub-prefix of `assets`
/// would also match `assets-old/...`. Keys are therefore re-checked
/// against the first path segment of the sub-prefix before they enter
/// the set.
pub async fn list_remote_keys(
    store: &dyn ObjectStore,
    sub_prefix: Option<&str>,
) -> SyncResult<RemoteKeySet> {
    let scope = sub_prefix.unwrap_or("");
    let scope_segment = scope.split('/').next().unwrap_or("");

    let mut keys = RemoteKeySet::new();
    let mut marker: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = store
            .list_page(scope, marker.as_deref(), LIST_PAGE_SIZE)
            .await?;
        pages += 1;

        for key in page.keys {
            if scope_segment.is_empty() || key.split('/').next() == Some(scope_segment) {
                keys.insert(key);
            }
        }

        if !page.is_truncated {
            break;
        }
        marker = page.next_marker;
        if marker.is_none() {
            return Err(SyncError::Storage(
                "listing reported truncation without a continuation marker".to_string(),
            ));
        }
    }

    debug!("listed {} remote keys across {pages} pages", keys.len());
    Ok(keys)
}
