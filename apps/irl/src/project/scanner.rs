//! Workspace discovery.
//!
//! A project is any immediate subdirectory of the workspace root holding a
//! marker plan file in one of [`MARKER_PATHS`]. Scan results are computed on
//! demand and never persisted.

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{MARKER_PATHS, SCAFFOLD_DIRS};
use crate::errors::IrlError;

/// A project found in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Folder name.
    pub name: String,
    /// Absolute path of the folder.
    pub path: PathBuf,
    /// Modification time of the marker file.
    pub modified_at: DateTime<Local>,
}

impl Project {
    /// Human-readable age of the plan relative to `now`.
    #[must_use]
    pub fn age_label(&self, now: DateTime<Local>) -> String {
        let days = (now - self.modified_at).num_days();
        match days {
            ..=0 => "today".to_string(),
            1 => "yesterday".to_string(),
            2..=6 => format!("{days} days ago"),
            7..=13 => "1 week ago".to_string(),
            14..=29 => format!("{} weeks ago", days / 7),
            30..=59 => "1 month ago".to_string(),
            60..=364 => format!("{} months ago", days / 30),
            365..=729 => "1 year ago".to_string(),
            _ => format!("{} years ago", days / 365),
        }
    }
}

/// Returns the first marker file present in `dir`, in priority order.
#[must_use]
pub fn find_marker(dir: &Path) -> Option<PathBuf> {
    MARKER_PATHS
        .iter()
        .map(|rel| dir.join(rel))
        .find(|path| path.is_file())
}

/// Lists projects under `base_dir`, most recently modified first.
///
/// Hidden directories and the scaffold's own directory names are skipped.
/// Entries that cannot be inspected are skipped rather than failing the
/// whole scan. Ties are broken by name.
///
/// # Errors
///
/// Returns `DirectoryError` if `base_dir` cannot be listed.
pub fn scan(base_dir: &Path) -> Result<Vec<Project>> {
    let entries =
        std::fs::read_dir(base_dir).map_err(|e| IrlError::directory_error(base_dir, e))?;

    let mut projects = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || SCAFFOLD_DIRS.contains(&name.as_str()) {
            continue;
        }

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(marker) = find_marker(&path) else {
            continue;
        };
        let Ok(modified) = std::fs::metadata(&marker).and_then(|m| m.modified()) else {
            tracing::debug!(path = %marker.display(), "skipping project with unreadable marker");
            continue;
        };

        projects.push(Project {
            name,
            path: std::path::absolute(&path).unwrap_or(path),
            modified_at: DateTime::<Local>::from(modified),
        });
    }

    projects.sort_by(|a, b| {
        b.modified_at
            .cmp(&a.modified_at)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(projects)
}

/// Finds a project by folder name.
///
/// # Errors
///
/// Returns `DirectoryError` if the workspace cannot be listed and
/// `NotFound` if no project has that name.
pub fn find_project(base_dir: &Path, name: &str) -> Result<Project> {
    scan(base_dir)?
        .into_iter()
        .find(|project| project.name == name)
        .ok_or_else(|| {
            IrlError::not_found(format!("project '{name}' in {}", base_dir.display())).into()
        })
}
