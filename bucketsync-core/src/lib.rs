//! Directory-to-bucket synchronization engine.
//!
//! One run mirrors a local tree to an object-storage bucket, optionally
//! scoped to a sub-prefix:
//!
//! - Walk the local root into a flat file list
//! - Page through the remote keys into a pending-deletion set
//! - Upload every local file, exempting ignore-prefix keys that are
//!   already present
//! - Batch-delete the remote keys no local file claimed, best effort
//!   per batch
//!
//! An optional module gate (a YAML allow-list) can veto the whole run
//! before anything touches the bucket. Fatal errors (listing, upload,
//! configuration) abort the run; per-batch delete failures are reported
//! and the run continues.

pub mod config;
pub mod deleter;
pub mod error;
pub mod gate;
pub mod keyset;
pub mod lister;
pub mod reconciler;
pub mod runner;
pub mod s3;
pub mod scanner;
pub mod store;

pub use config::{RemotePath, SyncConfig};
pub use deleter::{BatchFailure, DeleteReport};
pub use error::{SyncError, SyncResult};
pub use gate::{Envfile, GateDecision};
pub use keyset::RemoteKeySet;
pub use reconciler::{Reconciler, SyncReport};
pub use runner::{RunStatus, SyncRunner};
pub use s3::S3ObjectStore;
pub use scanner::LocalScanner;
pub use store::{ObjectPage, ObjectStore};
