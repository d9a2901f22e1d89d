//! Command line entry point.
//!
//! Every flag doubles as a `PLUGIN_*` environment variable so the binary
//! drops into CI pipelines that pass settings through the environment.

use bucketsync_core::{RunStatus, S3ObjectStore, SyncConfig, SyncRunner};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Mirror a local directory to an object-storage bucket prefix.
#[derive(Parser)]
#[command(name = "bucketsync", version, about)]
struct Cli {
    /// Local directory to upload.
    #[arg(long, env = "PLUGIN_DIST")]
    dist: PathBuf,

    /// Remote key prefix exempt from deletion and from re-upload once present.
    #[arg(long, env = "PLUGIN_DIST_IGNORE")]
    dist_ignore: Option<String>,

    /// Remote target, either "bucket" or "bucket/sub/prefix".
    #[arg(long, env = "PLUGIN_PATH")]
    path: String,

    /// Object-storage endpoint URL.
    #[arg(long, env = "PLUGIN_END_POINT")]
    end_point: String,

    #[arg(long, env = "PLUGIN_ACCESS_KEY_ID")]
    access_key_id: String,

    #[arg(long, env = "PLUGIN_ACCESS_KEY_SECRET", hide_env_values = true)]
    access_key_secret: String,

    /// Signing region for the endpoint.
    #[arg(long, env = "PLUGIN_REGION", default_value = "us-east-1")]
    region: String,

    /// Module name checked against the allow-list before syncing.
    #[arg(long, env = "PLUGIN_MOD_NAME")]
    mod_name: Option<String>,

    /// YAML allow-list consulted when a module name is set.
    #[arg(long, env = "PLUGIN_ENV_FILE", default_value = "env.yaml")]
    env_file: PathBuf,

    /// Warn and continue when a local entry cannot be read, instead of aborting.
    #[arg(long, env = "PLUGIN_SKIP_SCAN_ERRORS")]
    skip_scan_errors: bool,

    /// Follow symlinks while scanning the local directory.
    #[arg(long, env = "PLUGIN_FOLLOW_LINKS")]
    follow_links: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bucketsync=info,bucketsync_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = SyncConfig {
        local_root: cli.dist,
        ignore_prefix: cli.dist_ignore,
        remote_path: cli.path,
        endpoint: cli.end_point,
        access_key_id: cli.access_key_id,
        access_key_secret: cli.access_key_secret,
        region: cli.region,
        module_name: cli.mod_name,
        allow_list_path: cli.env_file,
        skip_scan_errors: cli.skip_scan_errors,
        follow_links: cli.follow_links,
    };
    config.validate()?;

    let store = S3ObjectStore::new(&config)?;
    match SyncRunner::new(config).run(&store).await? {
        RunStatus::Skipped { module } => {
            info!("nothing to do: module {module} is not in the allow-list");
        }
        RunStatus::Completed(report) => {
            info!(
                "sync finished: {} uploaded, {} exempted, {} preserved, {} deleted",
                report.uploaded.len(),
                report.exempted.len(),
                report.preserved.len(),
                report.delete.deleted.len()
            );
            if !report.delete.failures.is_empty() {
                error!(
                    "{} delete batches failed, the affected objects remain in the bucket",
                    report.delete.failures.len()
                );
            }
        }
    }
    Ok(())
}
