//! Project scaffolding operations.
//!
//! These functions only touch the filesystem and the `git` executable; the
//! decisions about *whether* to call them live in [`super::ops`].

use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::PLAN_PATH;
use crate::errors::IrlError;
use crate::settings::Profile;

/// Leaf directories that receive a `.gitkeep` placeholder.
const PLACEHOLDER_DIRS: [&str; 5] = [
    "plans",
    "01-plans",
    "02-data/raw",
    "02-data/derived",
    "03-outputs/figures",
];

const LOGS_DIR: &str = "04-logs";
const ACTIVITY_LOG: &str = "04-logs/activity-log.md";

/// Paths staged when committing into a repository that already existed.
const SCAFFOLD_OWNED: [&str; 6] = [
    ".gitignore",
    "plans",
    "01-plans",
    "02-data",
    "03-outputs",
    "04-logs",
];

/// Identity used for the initial commit when git has none configured.
const FALLBACK_GIT_NAME: &str = "irl";
const FALLBACK_GIT_EMAIL: &str = "irl@localhost";

/// What [`create_scaffold`] found already in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// A `.gitignore` existed and was left untouched.
    pub gitignore_existed: bool,
}

/// Creates the standard layout inside `path`.
///
/// Directories are created as needed. Placeholders, the activity log and
/// `.gitignore` are written only when missing, so calling this twice leaves
/// the tree unchanged.
///
/// The operation is not transactional: if a step fails, the directories and
/// files created before it remain.
///
/// # Errors
///
/// Returns `IoError` if a directory or file cannot be created.
pub fn create_scaffold(path: &Path) -> Result<ScaffoldReport> {
    for dir in PLACEHOLDER_DIRS.iter().chain(std::iter::once(&LOGS_DIR)) {
        let dir_path = path.join(dir);
        std::fs::create_dir_all(&dir_path)
            .map_err(|e| IrlError::io_error(format!("Failed to create {dir}/"), e))?;
    }

    for dir in PLACEHOLDER_DIRS {
        write_if_missing(&path.join(dir).join(".gitkeep"), "")?;
    }
    write_if_missing(&path.join(ACTIVITY_LOG), activity_log_header())?;

    let gitignore_existed = !write_if_missing(&path.join(".gitignore"), gitignore_content())?;
    if gitignore_existed {
        tracing::info!(path = %path.display(), "keeping existing .gitignore");
    }

    Ok(ScaffoldReport { gitignore_existed })
}

/// Writes `content` to `path` unless the file exists. Returns whether it wrote.
fn write_if_missing(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    std::fs::write(path, content)
        .map_err(|e| IrlError::io_error(format!("Failed to write {}", path.display()), e))?;
    Ok(true)
}

/// Writes the plan file, replacing any existing one.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be written.
pub fn write_plan(path: &Path, content: &str) -> Result<PathBuf> {
    let plan_path = path.join(PLAN_PATH);
    if let Some(parent) = plan_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| IrlError::io_error(format!("Failed to create {}", parent.display()), e))?;
    }
    std::fs::write(&plan_path, content).map_err(|e| {
        IrlError::io_error(format!("Failed to write {}", plan_path.display()), e)
    })?;
    Ok(plan_path)
}

/// Records the project in git.
///
/// Without a `.git` directory, this runs `git init`, stages everything and
/// commits. With one, only the scaffold-owned paths are staged and a commit
/// is made if anything changed. Nothing is rolled back on failure.
///
/// # Errors
///
/// Returns `GitError` if git is missing or any step exits unsuccessfully.
pub fn git_init(path: &Path, message: &str) -> Result<()> {
    if path.join(".git").exists() {
        let owned: Vec<&str> = SCAFFOLD_OWNED
            .iter()
            .copied()
            .filter(|p| path.join(p).exists())
            .collect();
        let mut args = vec!["add", "--"];
        args.extend(owned);
        run_git(path, &args)?;
    } else {
        run_git(path, &["init", "--quiet"])?;
        run_git(path, &["add", "-A"])?;
    }

    if !has_staged_changes(path)? {
        tracing::debug!(path = %path.display(), "nothing to commit");
        return Ok(());
    }

    let mut args: Vec<String> = Vec::new();
    if !has_git_identity(path) {
        args.extend([
            "-c".to_string(),
            format!("user.name={FALLBACK_GIT_NAME}"),
            "-c".to_string(),
            format!("user.email={FALLBACK_GIT_EMAIL}"),
        ]);
    }
    args.extend([
        "commit".to_string(),
        "--quiet".to_string(),
        "-m".to_string(),
        message.to_string(),
    ]);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run_git(path, &args)?;
    Ok(())
}

/// Runs `git -C <path> <args>` and maps any failure to `GitError`.
fn run_git(path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(path)
        .args(args)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IrlError::git_error("git not found in PATH")
            } else {
                IrlError::git_error(format!("failed to run git: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let step = args
            .iter()
            .find(|a| !a.starts_with('-') && !a.contains('='))
            .unwrap_or(&"command");
        return Err(IrlError::git_error(format!("git {step} failed: {}", stderr.trim())).into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// True when the index differs from `HEAD` (or any file is staged in a
/// repository without commits).
fn has_staged_changes(path: &Path) -> Result<bool> {
    let status = Command::new("git")
        .arg("-C")
        .arg(path)
        .args(["diff", "--cached", "--quiet"])
        .status()
        .map_err(|e| IrlError::git_error(format!("failed to run git: {e}")))?;
    Ok(!status.success())
}

fn has_git_identity(path: &Path) -> bool {
    run_git(path, &["config", "user.email"]).is_ok_and(|email| !email.trim().is_empty())
}

/// Replaces profile placeholders (`{{name}}`, `{{email}}`, ...) in `content`.
///
/// Absent fields become empty strings.
#[must_use]
pub fn inject_profile(content: &str, profile: &Profile) -> String {
    profile
        .fields()
        .iter()
        .fold(content.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{{{key}}}}}"), value.unwrap_or(""))
        })
}

/// Replaces `{{project}}` and `{{date}}` in `content`.
#[must_use]
pub fn fill_project_fields(content: &str, project: &str, date: NaiveDate) -> String {
    content
        .replace("{{project}}", project)
        .replace("{{date}}", &date.format("%Y-%m-%d").to_string())
}

/// Produces the final plan text from a template body.
#[must_use]
pub fn render_plan(template: &str, project: &str, profile: &Profile, date: NaiveDate) -> String {
    inject_profile(&fill_project_fields(template, project, date), profile)
}

fn activity_log_header() -> &'static str {
    "# Activity log\n\n| Date | Entry |\n|------|-------|\n"
}

fn gitignore_content() -> &'static str {
    r"# OS and editor files
.DS_Store
Thumbs.db
*.swp
*~
.idea/
.vscode/

# Raw and derived data are usually too large for git
02-data/raw/*
!02-data/raw/.gitkeep
02-data/derived/*
!02-data/derived/.gitkeep

# Environments and caches
.venv/
__pycache__/
.ipynb_checkpoints/
"
}
