//! On-disk template cache.
//!
//! The cache is a directory holding `index.json` (a JSON array of
//! `{name, description}`) and one `<name>.md` file per template. The index
//! file's modification time is the freshness stamp; content files are
//! written first and the index last.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::{Template, TemplateMeta, describe};
use crate::errors::IrlError;

/// How long a cache index is considered fresh.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

const INDEX_FILE: &str = "index.json";

/// Handle to a template cache directory.
#[derive(Debug, Clone)]
pub struct TemplateCache {
    dir: PathBuf,
}

impl TemplateCache {
    /// Creates a handle for `dir`. Nothing is touched on disk.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `index.json`.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    /// Path of the content file for `name`.
    #[must_use]
    pub fn content_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.md"))
    }

    /// Age of the index, or `None` when there is no index.
    ///
    /// A modification time in the future counts as age zero.
    #[must_use]
    pub fn age(&self) -> Option<Duration> {
        let modified = std::fs::metadata(self.index_path())
            .and_then(|m| m.modified())
            .ok()?;
        Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        )
    }

    /// True when an index exists and is within [`FRESHNESS_WINDOW`].
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.age().is_some_and(|age| age <= FRESHNESS_WINDOW)
    }

    /// Reads the index. Missing or unparsable indexes yield `None`.
    #[must_use]
    pub fn read_index(&self) -> Option<Vec<TemplateMeta>> {
        let content = std::fs::read_to_string(self.index_path()).ok()?;
        match serde_json::from_str(&content) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable template cache index");
                None
            }
        }
    }

    /// Names recorded in the index.
    #[must_use]
    pub fn cached_names(&self) -> Vec<String> {
        self.read_index()
            .unwrap_or_default()
            .into_iter()
            .map(|meta| meta.name)
            .collect()
    }

    /// Loads every indexed template with its content.
    ///
    /// A missing content file yields an empty body rather than an error.
    /// An empty index counts as no cache.
    #[must_use]
    pub fn load(&self) -> Option<Vec<Template>> {
        let index = self.read_index()?;
        if index.is_empty() {
            return None;
        }
        Some(
            index
                .into_iter()
                .map(|meta| Template {
                    content: std::fs::read_to_string(self.content_path(&meta.name))
                        .unwrap_or_default(),
                    name: meta.name,
                    description: meta.description,
                })
                .collect(),
        )
    }

    /// Loads one template by name, regardless of freshness.
    ///
    /// Returns `None` when no content file exists for `name`.
    #[must_use]
    pub fn load_template(&self, name: &str) -> Option<Template> {
        let content = std::fs::read_to_string(self.content_path(name)).ok()?;
        let description = self
            .read_index()
            .and_then(|index| index.into_iter().find(|meta| meta.name == name))
            .map_or_else(|| describe(name).to_string(), |meta| meta.description);
        Some(Template {
            name: name.to_string(),
            description,
            content,
        })
    }

    /// Writes the content file for one template.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the directory or file cannot be written.
    pub fn write_content(&self, name: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.content_path(name);
        std::fs::write(&path, content)
            .map_err(|e| IrlError::io_error(format!("Failed to write {}", path.display()), e))?;
        Ok(())
    }

    /// Overwrites the index, which also refreshes the freshness stamp.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the directory or file cannot be written.
    pub fn write_index(&self, index: &[TemplateMeta]) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(index).context("Failed to serialize template index")?;
        let path = self.index_path();
        std::fs::write(&path, content)
            .map_err(|e| IrlError::io_error(format!("Failed to write {}", path.display()), e))?;
        Ok(())
    }

    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            IrlError::io_error(format!("Failed to create {}", self.dir.display()), e).into()
        })
    }
}
