//! Subcommands of the `irl` CLI.
//!
//! ## Projects
//!
//! - [`init`] - Create a new project folder
//! - [`adopt`] - Copy an existing folder into the workspace
//! - [`list`] - List projects in the workspace
//! - [`open`] - Open a project in an editor
//!
//! ## Settings
//!
//! - [`config`] - Workspace directory and plan editor
//! - [`profile`] - Researcher profile injected into plans
//!
//! ## Templates and health
//!
//! - [`templates`] - List available plan templates
//! - [`update`] - Refresh the template cache
//! - [`doctor`] - Check the environment

pub mod adopt;
pub mod config;
pub mod doctor;
pub mod init;
pub mod list;
pub mod open;
pub mod profile;
pub mod templates;
pub mod update;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::settings::ConfigStore;

/// Workspace for a command: `--dir` when given, else the configured default.
///
/// # Errors
///
/// Returns `ConfigError` when neither is available.
fn workspace_dir(dir: Option<&Path>, store: &ConfigStore) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())),
        None => store.require_default_directory(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IrlError;

    #[test]
    fn explicit_dir_wins_over_config() {
        let store = ConfigStore::new(
            std::env::temp_dir().join(format!("irl_test_{}/config.json", rand::random::<u64>())),
        );
        let dir = workspace_dir(Some(Path::new("relative/ws")), &store).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("relative/ws"));
    }

    #[test]
    fn missing_config_is_config_error() {
        let store = ConfigStore::new(
            std::env::temp_dir().join(format!("irl_test_{}/config.json", rand::random::<u64>())),
        );
        let err = workspace_dir(None, &store).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IrlError>(),
            Some(IrlError::ConfigError { .. })
        ));
    }
}
