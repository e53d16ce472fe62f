//! Creating and adopting projects.
//!
//! Both operations are synchronous and take an already resolved template
//! body, so they can run unchanged from a CLI command or a wizard worker
//! thread. Hard failures are returned as errors; soft failures (git, a
//! pre-existing `.gitignore`) are collected as warnings on the outcome.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::scaffold::{create_scaffold, git_init, render_plan, write_plan};
use super::scanner::find_marker;
use crate::errors::{IrlError, find_irl_error};
use crate::settings::Profile;

/// Parameters for [`create_project`].
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Workspace root; created if missing.
    pub base_dir: PathBuf,
    /// Folder name of the new project.
    pub name: String,
    /// Template body for the plan file.
    pub template: String,
    pub profile: Profile,
    /// Whether to initialize a git repository.
    pub git: bool,
}

/// Parameters for [`adopt_folder`].
#[derive(Debug, Clone)]
pub struct AdoptRequest {
    /// Existing folder to copy into the workspace.
    pub source: PathBuf,
    /// Workspace root; created if missing.
    pub base_dir: PathBuf,
    /// Folder name in the workspace; defaults to the source's name.
    pub rename: Option<String>,
    /// Template body used only when the folder has no plan yet.
    pub template: String,
    pub profile: Profile,
}

/// Result of a successful create or adopt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    pub name: String,
    pub path: PathBuf,
    /// Whether a plan file was written from the template.
    pub plan_written: bool,
    /// Non-fatal problems to show the user.
    pub warnings: Vec<String>,
}

/// Creates a new project folder with scaffold, plan and (optionally) git.
///
/// # Errors
///
/// Returns `InvalidArguments` for an unusable name, `AlreadyExists` if the
/// target folder exists, and `IoError` if the scaffold cannot be written.
pub fn create_project(request: &CreateRequest) -> Result<ProjectOutcome> {
    validate_folder_name(&request.name)?;
    let path = request.base_dir.join(&request.name);
    if path.exists() {
        return Err(IrlError::already_exists(path).into());
    }

    std::fs::create_dir_all(&path)
        .map_err(|e| IrlError::io_error(format!("Failed to create {}", path.display()), e))?;

    let mut warnings = Vec::new();
    create_scaffold(&path)?;
    write_plan(&path, &plan_for(&request.template, &request.name, &request.profile))?;

    if request.git {
        commit_softly(&path, "Create project scaffold", &mut warnings)?;
    }

    tracing::info!(path = %path.display(), "project created");
    Ok(ProjectOutcome {
        name: request.name.clone(),
        path,
        plan_written: true,
        warnings,
    })
}

/// Copies an existing folder into the workspace and turns it into a project.
///
/// The source is left untouched. An existing plan in any marker location is
/// kept; otherwise the template is written. Validation happens before any
/// filesystem change, so a rejected request mutates nothing.
///
/// # Errors
///
/// - `NotFound` if the source is missing or not a directory
/// - `AlreadyInWorkspace` if the source is the workspace or inside it
/// - `InvalidArguments` if the workspace is inside the source, or the name is unusable
/// - `AlreadyExists` if the target folder exists
/// - `IoError` if copying or scaffolding fails
pub fn adopt_folder(request: &AdoptRequest) -> Result<ProjectOutcome> {
    let source = std::fs::canonicalize(&request.source)
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| IrlError::not_found(format!("directory {}", request.source.display())))?;

    if let Ok(workspace) = std::fs::canonicalize(&request.base_dir) {
        if source.starts_with(&workspace) {
            return Err(IrlError::already_in_workspace(source, workspace).into());
        }
        if workspace.starts_with(&source) {
            return Err(IrlError::invalid_arguments(format!(
                "workspace {} is inside {}",
                workspace.display(),
                source.display()
            ))
            .into());
        }
    }

    let name = match &request.rename {
        Some(name) => name.clone(),
        None => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| IrlError::invalid_arguments("source folder has no name"))?,
    };
    validate_folder_name(&name)?;

    let path = request.base_dir.join(&name);
    if path.exists() {
        return Err(IrlError::already_exists(path).into());
    }

    std::fs::create_dir_all(&request.base_dir).map_err(|e| {
        IrlError::io_error(format!("Failed to create {}", request.base_dir.display()), e)
    })?;
    copy_dir(&source, &path)?;

    let plan_written = find_marker(&path).is_none();
    if plan_written {
        write_plan(&path, &plan_for(&request.template, &name, &request.profile))?;
    }

    let mut warnings = Vec::new();
    if create_scaffold(&path)?.gitignore_existed {
        warnings.push("kept the folder's existing .gitignore".to_string());
    }
    commit_softly(&path, &format!("Adopt {name} into workspace"), &mut warnings)?;

    tracing::info!(source = %source.display(), path = %path.display(), "folder adopted");
    Ok(ProjectOutcome {
        name,
        path,
        plan_written,
        warnings,
    })
}

fn plan_for(template: &str, name: &str, profile: &Profile) -> String {
    render_plan(template, name, profile, chrono::Local::now().date_naive())
}

/// Runs git, turning soft failures into a warning.
fn commit_softly(path: &Path, message: &str, warnings: &mut Vec<String>) -> Result<()> {
    if let Err(e) = git_init(path, message) {
        let warning = soft_warning(e)?;
        tracing::warn!(error = %warning, path = %path.display(), "git step failed");
        warnings.push(warning);
    }
    Ok(())
}

/// Returns the warning text for a soft error, or the error itself if hard.
fn soft_warning(err: anyhow::Error) -> Result<String> {
    if find_irl_error(&err).is_some_and(IrlError::is_soft) {
        Ok(format!("{err}"))
    } else {
        Err(err)
    }
}

/// Rejects names that are not a single plain path component.
fn validate_folder_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
    {
        let message = format!("'{name}' is not a valid folder name");
        return Err(IrlError::invalid_arguments(message).into());
    }
    Ok(())
}

/// Recursively copies `from` to the not-yet-existing `to`.
#[cfg(not(windows))]
fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    let output = Command::new("cp")
        .arg("-R")
        .arg(from)
        .arg(to)
        .output()
        .map_err(|e| IrlError::io_error("Failed to run cp", e))?;
    check_copy(&output, from)
}

#[cfg(windows)]
fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    let output = Command::new("xcopy")
        .arg(from)
        .arg(to)
        .args(["/E", "/I", "/H", "/Y", "/Q"])
        .output()
        .map_err(|e| IrlError::io_error("Failed to run xcopy", e))?;
    check_copy(&output, from)
}

fn check_copy(output: &std::process::Output, from: &Path) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(IrlError::io_error(
        format!("Failed to copy {}", from.display()),
        std::io::Error::other(stderr.trim().to_string()),
    )
    .into())
}
