//! Path management for irl's own state.
//!
//! The default root directory is `~/.irl/`, which can be overridden by
//! setting the `IRL_HOME` environment variable.
//!
//! ## Directory Structure
//!
//! ```text
//! ~/.irl/                     # Root directory (or IRL_HOME)
//!   config.json               # Config and profile
//!   irl.log                   # Log output while the TUI owns the terminal
//!   cache/
//!     templates/
//!       index.json            # Cached template metadata
//!       default.md            # One file per cached template
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable to override the default root directory.
pub const IRL_HOME_ENV: &str = "IRL_HOME";

const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "irl.log";

/// Resolved locations of every file irl owns.
#[derive(Debug, Clone)]
pub struct IrlPaths {
    /// Root directory (`~/.irl` or `IRL_HOME`).
    pub root: PathBuf,
    /// Template cache directory.
    pub templates_cache: PathBuf,
}

impl IrlPaths {
    /// Resolves paths from `IRL_HOME`, falling back to `~/.irl`.
    ///
    /// Empty or whitespace-only values of `IRL_HOME` are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `IRL_HOME` is unset and the home directory cannot
    /// be determined.
    pub fn new() -> Result<Self> {
        let root = match std::env::var(IRL_HOME_ENV) {
            Ok(home) if !home.trim().is_empty() => PathBuf::from(home),
            _ => dirs::home_dir()
                .context("Cannot determine home directory. Set IRL_HOME environment variable.")?
                .join(".irl"),
        };
        Ok(Self::with_root(root))
    }

    /// Creates paths under a specific root directory.
    #[must_use = "returns new paths instance without side effects"]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            templates_cache: root.join("cache").join("templates"),
            root,
        }
    }

    /// Returns the path to the JSON config file.
    #[must_use = "returns the path without side effects"]
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Returns the path to the TUI log file.
    #[must_use = "returns the path without side effects"]
    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Creates the root and cache directories if they are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.root, &self.templates_cache] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}
