//! Environment health checks.
//!
//! Used by the `doctor` command. Each check is independent and reports a
//! status instead of failing, so one broken piece never hides the others.
//!
//! ## Checks Performed
//!
//! - `git` availability
//! - git identity for commits
//! - Config file readability
//! - Default workspace directory
//! - Template cache freshness
//! - Plan editor availability

use super::editor::{LaunchRequest, detect_installed, env_editor};
use crate::errors::{IrlError, find_irl_error};
use crate::project::scan;
use crate::settings::{Config, ConfigStore, IrlPaths};
use crate::templates::TemplateCache;
use crate::templates::cache::FRESHNESS_WINDOW;

/// Status of a doctor check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorCheckStatus {
    /// Check passed.
    Ok,
    /// Check passed with warnings.
    Warning,
    /// Check failed.
    Error,
}

/// Result of a single doctor check.
#[derive(Debug, Clone)]
pub struct DoctorCheck {
    /// Name of the check.
    pub name: String,
    /// Status of the check.
    pub status: DoctorCheckStatus,
    /// Descriptive message.
    pub message: String,
}

impl DoctorCheck {
    /// Creates a new check with Ok status.
    #[must_use]
    pub fn ok(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DoctorCheckStatus::Ok,
            message: message.into(),
        }
    }

    /// Creates a new check with Warning status.
    #[must_use]
    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DoctorCheckStatus::Warning,
            message: message.into(),
        }
    }

    /// Creates a new check with Error status.
    #[must_use]
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DoctorCheckStatus::Error,
            message: message.into(),
        }
    }

    /// Returns the CLI prefix for this check status.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self.status {
            DoctorCheckStatus::Ok => "[OK]",
            DoctorCheckStatus::Warning => "[WARN]",
            DoctorCheckStatus::Error => "[FAIL]",
        }
    }
}

/// Runs all doctor checks against the files under `paths`.
#[must_use]
pub fn run_all_checks(paths: &IrlPaths) -> Vec<DoctorCheck> {
    let store = ConfigStore::from_paths(paths);
    let (config_check, config) = check_config(&store);

    vec![
        check_git(),
        check_git_identity(),
        config_check,
        check_default_directory(&config),
        check_template_cache(&TemplateCache::new(&paths.templates_cache)),
        check_editor(&config),
    ]
}

/// Checks that `git` is in PATH.
#[must_use]
pub fn check_git() -> DoctorCheck {
    match which::which("git") {
        Ok(path) => DoctorCheck::ok("git", format!("Found at {}", path.display())),
        Err(_) => DoctorCheck::warning(
            "git",
            "Not found in PATH. Projects will be created without version control.",
        ),
    }
}

/// Checks that git has a committer email configured.
#[must_use]
pub fn check_git_identity() -> DoctorCheck {
    let output = std::process::Command::new("git")
        .args(["config", "user.email"])
        .output();
    match output {
        Ok(out) if out.status.success() && !out.stdout.trim_ascii().is_empty() => {
            let email = String::from_utf8_lossy(out.stdout.trim_ascii()).into_owned();
            DoctorCheck::ok("git identity", format!("Committing as {email}"))
        }
        Ok(_) => DoctorCheck::warning(
            "git identity",
            "No user.email configured. Initial commits will use 'irl <irl@localhost>'.",
        ),
        Err(_) => DoctorCheck::warning("git identity", "Cannot check without git."),
    }
}

/// Checks that the config file parses. Returns the loaded (or default) config.
#[must_use]
pub fn check_config(store: &ConfigStore) -> (DoctorCheck, Config) {
    let name = "Config file";
    match store.load() {
        Ok(config) if store.path().exists() => (
            DoctorCheck::ok(name, format!("Loaded {}", store.path().display())),
            config,
        ),
        Ok(config) => (
            DoctorCheck::warning(
                name,
                format!(
                    "Not created yet at {}. Run 'irl config set-dir <PATH>'.",
                    store.path().display()
                ),
            ),
            config,
        ),
        Err(e) => {
            let message = match find_irl_error(&e) {
                Some(IrlError::ParseError { .. }) => format!("Invalid JSON. {e}"),
                _ => format!("Cannot read: {e}"),
            };
            (DoctorCheck::error(name, message), Config::default())
        }
    }
}

/// Checks the configured workspace directory.
#[must_use]
pub fn check_default_directory(config: &Config) -> DoctorCheck {
    let name = "Workspace";
    let Some(dir) = &config.default_directory else {
        return DoctorCheck::warning(
            name,
            "No default directory set. Run 'irl config set-dir <PATH>'.",
        );
    };
    if !dir.exists() {
        return DoctorCheck::warning(
            name,
            format!("{} does not exist yet. It will be created on first use.", dir.display()),
        );
    }
    match scan(dir) {
        Ok(projects) => DoctorCheck::ok(
            name,
            format!("{} ({} projects)", dir.display(), projects.len()),
        ),
        Err(e) => DoctorCheck::error(name, e.to_string()),
    }
}

/// Checks the template cache age.
#[must_use]
pub fn check_template_cache(cache: &TemplateCache) -> DoctorCheck {
    let name = "Template cache";
    let count = cache.cached_names().len();
    match cache.age() {
        None => DoctorCheck::warning(
            name,
            "Empty. Built-in templates will be used until 'irl update' succeeds.",
        ),
        Some(age) if age <= FRESHNESS_WINDOW => DoctorCheck::ok(
            name,
            format!("{count} templates, updated {} hours ago", age.as_secs() / 3600),
        ),
        Some(age) => DoctorCheck::warning(
            name,
            format!(
                "{count} templates, {} days old. Run 'irl update' to refresh.",
                age.as_secs() / 86_400
            ),
        ),
    }
}

/// Checks that some editor is available for opening plans.
#[must_use]
pub fn check_editor(config: &Config) -> DoctorCheck {
    let name = "Editor";
    if let Some(command) = &config.plan_editor {
        return match LaunchRequest::from_command(command, config.plan_editor_type) {
            Some(request) if which::which(&request.program).is_ok() => {
                DoctorCheck::ok(name, format!("{command} ({})", config.plan_editor_type))
            }
            _ => DoctorCheck::error(
                name,
                format!("Configured editor '{command}' not found in PATH."),
            ),
        };
    }
    if let Some(editor) = env_editor() {
        return DoctorCheck::ok(name, format!("Using {editor} from the environment"));
    }
    let installed = detect_installed();
    if installed.is_empty() {
        DoctorCheck::warning(
            name,
            "No known editor found. Run 'irl config set-editor <CMD>'.",
        )
    } else {
        let labels: Vec<&str> = installed.iter().map(|tool| tool.label).collect();
        DoctorCheck::ok(name, format!("Available: {}", labels.join(", ")))
    }
}
