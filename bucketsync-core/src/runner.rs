//! Run orchestration.
//!
//! Wires the gate, lister, scanner, and reconciler into one sequential
//! run against a caller-supplied [`ObjectStore`].

use crate::config::{RemotePath, SyncConfig};
use crate::error::SyncResult;
use crate::gate::{self, GateDecision};
use crate::lister;
use crate::reconciler::{Reconciler, SyncReport};
use crate::scanner::LocalScanner;
use crate::store::ObjectStore;
use tracing::info;

/// How a run ended when no fatal error occurred.
#[derive(Clone, Debug)]
pub enum RunStatus {
    /// The module gate vetoed the run; nothing was listed or uploaded.
    Skipped { module: String },
    Completed(SyncReport),
}

pub struct SyncRunner {
    config: SyncConfig,
}

impl SyncRunner {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self, store: &dyn ObjectStore) -> SyncResult<RunStatus> {
        if let GateDecision::Skip { module } = gate::evaluate(
            self.config.module_name.as_deref(),
            &self.config.allow_list_path,
        )? {
            return Ok(RunStatus::Skipped { module });
        }

        // Only a run that passed the gate may touch the store.
        store.verify().await?;

        let remote_path = RemotePath::parse(&self.config.remote_path)?;
        // CI environments pass unset options as empty strings.
        let ignore_prefix = self
            .config
            .ignore_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty());
        if let Some(prefix) = ignore_prefix {
            info!("ignore prefix active: {prefix}");
        }

        info!(
            "scanning local files under {}",
            self.config.local_root.display()
        );
        let local_files = LocalScanner::new(&self.config.local_root)
            .follow_links(self.config.follow_links)
            .continue_on_error(self.config.skip_scan_errors)
            .scan()?;

        info!(
            "listing objects in bucket {} (prefix: {})",
            remote_path.bucket,
            remote_path.prefix.as_deref().unwrap_or("<none>")
        );
        let remote = lister::list_remote_keys(store, remote_path.prefix.as_deref()).await?;

        let report = Reconciler::new(store, &self.config.local_root)
            .with_sub_prefix(remote_path.prefix.as_deref())
            .with_ignore_prefix(ignore_prefix)
            .reconcile(remote, &local_files)
            .await?;

        Ok(RunStatus::Completed(report))
    }
}
