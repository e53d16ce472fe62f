//! JSON persistence for the user's config and profile.
//!
//! The store holds no state of its own beyond the file path. Every accessor
//! re-reads the file and every mutator writes it back immediately, so two
//! processes editing the config concurrently resolve as last writer wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::paths::IrlPaths;
use crate::errors::IrlError;

/// How the configured plan editor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorKind {
    /// Runs in the foreground of the current terminal.
    #[default]
    Terminal,
    /// Opens its own window and is spawned detached.
    Gui,
}

impl std::fmt::Display for EditorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal => write!(f, "terminal"),
            Self::Gui => write!(f, "gui"),
        }
    }
}

/// Identity fields injected into plan templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Profile {
    /// Returns `(placeholder key, value)` pairs in a fixed order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("name", self.name.as_deref()),
            ("title", self.title.as_deref()),
            ("institution", self.institution.as_deref()),
            ("department", self.department.as_deref()),
            ("email", self.email.as_deref()),
            ("instructions", self.instructions.as_deref()),
        ]
    }

    /// True when at least one field holds a non-empty value.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.fields()
            .iter()
            .any(|(_, value)| value.is_some_and(|v| !v.trim().is_empty()))
    }

    /// Overlays every `Some` field of `update` onto `self`.
    ///
    /// An empty string clears the field.
    pub fn merge(&mut self, update: Profile) {
        fn apply(slot: &mut Option<String>, value: Option<String>) {
            if let Some(v) = value {
                *slot = if v.is_empty() { None } else { Some(v) };
            }
        }
        apply(&mut self.name, update.name);
        apply(&mut self.title, update.title);
        apply(&mut self.institution, update.institution);
        apply(&mut self.department, update.department);
        apply(&mut self.email, update.email);
        apply(&mut self.instructions, update.instructions);
    }
}

/// Persisted user configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace root under which projects are created and discovered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_directory: Option<PathBuf>,
    /// Command used to open plan files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_editor: Option<String>,
    pub plan_editor_type: EditorKind,
    pub profile: Profile,
}

/// Reads and writes [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the config file location for `paths`.
    #[must_use]
    pub fn from_paths(paths: &IrlPaths) -> Self {
        Self::new(paths.config_file())
    }

    /// Opens the store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be resolved.
    pub fn open() -> Result<Self> {
        Ok(Self::from_paths(&IrlPaths::new()?))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config. A missing file yields the default config.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the file holds invalid JSON and `IoError` if
    /// it exists but cannot be read.
    pub fn load(&self) -> Result<Config> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(IrlError::io_error(
                    format!("Failed to read {}", self.path.display()),
                    e,
                )
                .into());
            }
        };

        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            IrlError::parse_error(format!("{}: {e}", self.path.display())).into()
        })
    }

    /// Writes the config, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be written.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                IrlError::io_error(format!("Failed to create {}", parent.display()), e)
            })?;
        }
        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        std::fs::write(&self.path, content + "\n").map_err(|e| {
            IrlError::io_error(format!("Failed to write {}", self.path.display()), e)
        })?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Loads, applies `edit`, and saves.
    fn update(&self, edit: impl FnOnce(&mut Config)) -> Result<()> {
        let mut config = self.load()?;
        edit(&mut config);
        self.save(&config)
    }

    /// Returns the configured workspace root, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigStore::load`] failures.
    pub fn default_directory(&self) -> Result<Option<PathBuf>> {
        Ok(self.load()?.default_directory)
    }

    /// Returns the workspace root or a `ConfigError` naming how to set it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when no default directory is configured.
    pub fn require_default_directory(&self) -> Result<PathBuf> {
        self.default_directory()?.ok_or_else(|| {
            IrlError::config_error(
                "no default directory configured. Run 'irl config set-dir <PATH>' or pass --dir.",
            )
            .into()
        })
    }

    /// Persists the workspace root.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures.
    pub fn set_default_directory(&self, dir: impl Into<PathBuf>) -> Result<()> {
        let dir = dir.into();
        self.update(|config| config.default_directory = Some(dir))
    }

    /// Persists the plan editor command and how it runs.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures.
    pub fn set_plan_editor(&self, command: impl Into<String>, kind: EditorKind) -> Result<()> {
        let command = command.into();
        self.update(|config| {
            config.plan_editor = Some(command);
            config.plan_editor_type = kind;
        })
    }

    /// Returns the stored profile.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigStore::load`] failures.
    pub fn profile(&self) -> Result<Profile> {
        Ok(self.load()?.profile)
    }

    /// Replaces the stored profile.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures.
    pub fn set_profile(&self, profile: Profile) -> Result<()> {
        self.update(|config| config.profile = profile)
    }

    /// Resets every profile field.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures.
    pub fn clear_profile(&self) -> Result<()> {
        self.set_profile(Profile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (PathBuf, ConfigStore) {
        let root = std::env::temp_dir().join(format!("irl_test_{}", rand::random::<u64>()));
        let store = ConfigStore::new(root.join("config.json"));
        (root, store)
    }

    #[test]
    fn missing_file_loads_default() {
        let (root, store) = temp_store();
        let config = store.load().unwrap();
        assert_eq!(config, Config::default());
        assert!(!store.profile().unwrap().is_set());
        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let (root, store) = temp_store();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IrlError>(),
            Some(IrlError::ParseError { .. })
        ));
        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn default_directory_round_trips_across_stores() {
        let (root, store) = temp_store();
        store.set_default_directory("/tmp/research").unwrap();

        let fresh = ConfigStore::new(store.path());
        assert_eq!(
            fresh.default_directory().unwrap(),
            Some(PathBuf::from("/tmp/research"))
        );
        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn require_default_directory_errors_when_unset() {
        let (root, store) = temp_store();
        let err = store.require_default_directory().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IrlError>(),
            Some(IrlError::ConfigError { .. })
        ));
        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn profile_set_and_clear() {
        let (root, store) = temp_store();
        store.set_default_directory("/tmp/w").unwrap();
        store
            .set_profile(Profile {
                name: Some("Ada".to_string()),
                email: Some("ada@example.org".to_string()),
                ..Profile::default()
            })
            .unwrap();
        assert!(store.profile().unwrap().is_set());
        assert_eq!(store.profile().unwrap().name.as_deref(), Some("Ada"));

        store.clear_profile().unwrap();
        assert!(!store.profile().unwrap().is_set());
        assert_eq!(
            store.default_directory().unwrap(),
            Some(PathBuf::from("/tmp/w")),
            "clearing the profile keeps other settings"
        );
        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn whitespace_only_profile_is_not_set() {
        let profile = Profile {
            title: Some("  ".to_string()),
            ..Profile::default()
        };
        assert!(!profile.is_set());
    }

    #[test]
    fn merge_overlays_and_clears() {
        let mut profile = Profile {
            name: Some("Ada".to_string()),
            title: Some("Dr".to_string()),
            ..Profile::default()
        };
        profile.merge(Profile {
            title: Some(String::new()),
            institution: Some("Analytical Society".to_string()),
            ..Profile::default()
        });
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(profile.title, None);
        assert_eq!(profile.institution.as_deref(), Some("Analytical Society"));
    }

    #[test]
    fn plan_editor_is_persisted_with_kind() {
        let (root, store) = temp_store();
        store.set_plan_editor("code", EditorKind::Gui).unwrap();
        let config = store.load().unwrap();
        assert_eq!(config.plan_editor.as_deref(), Some("code"));
        assert_eq!(config.plan_editor_type, EditorKind::Gui);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"plan_editor_type\": \"gui\""));
        std::fs::remove_dir_all(root).ok();
    }
}
