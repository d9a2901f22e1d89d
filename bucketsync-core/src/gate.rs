//! Module gate.
//!
//! In multi-module builds only some modules are meant to publish. When a
//! module name is configured, the run consults a YAML allow-list and
//! silently skips the sync if the name is absent. Without a module name
//! the gate never touches the file.

use crate::error::{SyncError, SyncResult};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// The allow-list file format.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envfile {
    /// Name of the shared configuration package, unused by the gate itself.
    #[serde(default)]
    pub config_pkg: Option<String>,
    /// Module names allowed to sync.
    #[serde(default)]
    pub check_list: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Skip { module: String },
}

/// Reads and parses the allow-list file.
pub fn load_envfile(path: &Path) -> SyncResult<Envfile> {
    let text = std::fs::read_to_string(path).map_err(|e| SyncError::AllowList {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Decides whether the run may proceed. A missing or malformed
/// allow-list is only an error while a module name is configured; an
/// empty module name counts as unconfigured (CI environments pass
/// unset options as empty strings).
pub fn evaluate(module_name: Option<&str>, allow_list_path: &Path) -> SyncResult<GateDecision> {
    let module = match module_name {
        Some(module) if !module.is_empty() => module,
        _ => {
            debug!("no module name configured, allow-list not consulted");
            return Ok(GateDecision::Proceed);
        }
    };

    let envfile = load_envfile(allow_list_path)?;
    if envfile.check_list.iter().any(|entry| entry == module) {
        info!("module {module} is in the allow-list, continuing");
        Ok(GateDecision::Proceed)
    } else {
        info!("module {module} is not in the allow-list, skipping sync");
        Ok(GateDecision::Skip {
            module: module.to_string(),
        })
    }
}
