//! Configuration and remote path parsing tests.

use bucketsync_core::config::{RemotePath, SyncConfig};
use bucketsync_core::error::SyncError;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn valid_config() -> SyncConfig {
    SyncConfig {
        local_root: PathBuf::from("dist"),
        remote_path: "cdn-bucket/assets".to_string(),
        endpoint: "http://localhost:9000".to_string(),
        access_key_id: "key".to_string(),
        access_key_secret: "secret".to_string(),
        ..SyncConfig::default()
    }
}

#[test]
fn defaults_are_sensible() {
    let config = SyncConfig::default();
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.allow_list_path, PathBuf::from("env.yaml"));
    assert_eq!(config.ignore_prefix, None);
    assert_eq!(config.module_name, None);
    assert!(!config.skip_scan_errors);
    assert!(!config.follow_links);
}

#[test]
fn valid_config_passes_validation() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn missing_endpoint_fails_validation() {
    let config = SyncConfig {
        endpoint: String::new(),
        ..valid_config()
    };
    assert!(matches!(config.validate(), Err(SyncError::Config(_))));
}

#[test]
fn missing_credentials_fail_validation() {
    let config = SyncConfig {
        access_key_secret: String::new(),
        ..valid_config()
    };
    assert!(matches!(config.validate(), Err(SyncError::Config(_))));
}

#[test]
fn empty_remote_path_fails_validation() {
    let config = SyncConfig {
        remote_path: String::new(),
        ..valid_config()
    };
    assert!(matches!(config.validate(), Err(SyncError::Config(_))));
}

#[test]
fn remote_path_bucket_only() {
    let remote = RemotePath::parse("cdn-bucket").unwrap();
    assert_eq!(remote.bucket, "cdn-bucket");
    assert_eq!(remote.prefix, None);
}

#[test]
fn remote_path_with_sub_prefix() {
    let remote = RemotePath::parse("cdn-bucket/static/v2").unwrap();
    assert_eq!(remote.bucket, "cdn-bucket");
    assert_eq!(remote.prefix.as_deref(), Some("static/v2"));
}

#[test]
fn remote_path_trailing_slash_means_whole_bucket() {
    let remote = RemotePath::parse("cdn-bucket/").unwrap();
    assert_eq!(remote.bucket, "cdn-bucket");
    assert_eq!(remote.prefix, None);
}

#[test]
fn remote_path_trims_slashes_around_prefix() {
    let remote = RemotePath::parse("cdn-bucket//static/").unwrap();
    assert_eq!(remote.prefix.as_deref(), Some("static"));
}

#[test]
fn remote_path_without_bucket_is_rejected() {
    assert!(matches!(
        RemotePath::parse("/static"),
        Err(SyncError::Config(_))
    ));
    assert!(matches!(RemotePath::parse(""), Err(SyncError::Config(_))));
}

#[test]
fn config_round_trips_through_json() {
    let config = valid_config();
    let json = serde_json::to_string(&config).unwrap();
    let parsed: SyncConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.remote_path, config.remote_path);
    assert_eq!(parsed.local_root, config.local_root);
    assert_eq!(parsed.region, config.region);
}

#[test]
fn region_defaults_when_absent_from_serialized_form() {
    let parsed: SyncConfig = serde_json::from_str(
        r#"{
            "local_root": "dist",
            "ignore_prefix": null,
            "remote_path": "bucket",
            "endpoint": "http://localhost:9000",
            "access_key_id": "key",
            "access_key_secret": "secret",
            "module_name": null
        }"#,
    )
    .unwrap();
    assert_eq!(parsed.region, "us-east-1");
    assert_eq!(parsed.allow_list_path, PathBuf::from("env.yaml"));
}
