//! Directory browser used to pick a workspace or a folder to adopt.
//!
//! Lists the subdirectories of the current location through a fixed-height
//! scrolling window. Hidden directories are excluded and folders that already
//! hold a project are flagged.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::project::find_marker;

/// Rows shown at once.
pub const VISIBLE_ROWS: usize = 12;

/// Entry ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Name,
    /// Most recently modified first.
    Recent,
}

impl SortMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Recent => "recent",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Name => Self::Recent,
            Self::Recent => Self::Name,
        }
    }
}

/// A subdirectory of the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    /// Whether the folder already holds a plan file.
    pub is_project: bool,
}

#[derive(Debug, Clone)]
pub struct DirBrowser {
    current: PathBuf,
    entries: Vec<DirEntry>,
    cursor: usize,
    offset: usize,
    sort: SortMode,
    /// Set when the current directory could not be listed.
    pub error: Option<String>,
}

impl DirBrowser {
    /// Opens a browser at `start`, made absolute.
    #[must_use]
    pub fn new(start: &Path) -> Self {
        let mut browser = Self {
            current: std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf()),
            entries: Vec::new(),
            cursor: 0,
            offset: 0,
            sort: SortMode::default(),
            error: None,
        };
        browser.reload();
        browser
    }

    #[must_use]
    pub fn current(&self) -> &Path {
        &self.current
    }

    #[must_use]
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Entries inside the scroll window, with their absolute indices.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &DirEntry)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(VISIBLE_ROWS)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&DirEntry> {
        self.entries.get(self.cursor)
    }

    pub fn up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.scroll_to_cursor();
        }
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.scroll_to_cursor();
        }
    }

    /// Moves into the selected subdirectory. Returns `false` if there is none.
    pub fn enter_selected(&mut self) -> bool {
        let Some(entry) = self.selected() else {
            return false;
        };
        self.current = entry.path.clone();
        self.cursor = 0;
        self.offset = 0;
        self.reload();
        true
    }

    /// Moves to the parent directory, keeping the cursor on the folder just
    /// left. Returns `false` at the filesystem root.
    pub fn go_parent(&mut self) -> bool {
        let Some(parent) = self.current.parent().map(Path::to_path_buf) else {
            return false;
        };
        let previous = std::mem::replace(&mut self.current, parent);
        self.reload();
        self.cursor = self
            .entries
            .iter()
            .position(|entry| entry.path == previous)
            .unwrap_or(0);
        self.scroll_to_cursor();
        true
    }

    /// Switches between name and recency order, keeping the selected entry.
    pub fn toggle_sort(&mut self) {
        let selected = self.selected().map(|entry| entry.path.clone());
        self.sort = self.sort.toggled();
        self.sort_entries();
        self.cursor = selected
            .and_then(|path| self.entries.iter().position(|entry| entry.path == path))
            .unwrap_or(0);
        self.scroll_to_cursor();
    }

    /// Re-reads the current directory.
    pub fn reload(&mut self) {
        match list_subdirectories(&self.current) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                tracing::debug!(path = %self.current.display(), error = %e, "cannot list directory");
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }
        self.sort_entries();
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
        self.scroll_to_cursor();
    }

    fn sort_entries(&mut self) {
        match self.sort {
            SortMode::Name => self
                .entries
                .sort_by_cached_key(|entry| entry.name.to_lowercase()),
            SortMode::Recent => self
                .entries
                .sort_by_key(|entry| (Reverse(entry.modified), entry.name.to_lowercase())),
        }
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + VISIBLE_ROWS {
            self.offset = self.cursor + 1 - VISIBLE_ROWS;
        }
    }
}

fn list_subdirectories(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)?.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        entries.push(DirEntry {
            modified: entry.metadata().and_then(|m| m.modified()).ok(),
            is_project: find_marker(&path).is_some(),
            name,
            path,
        });
    }
    Ok(entries)
}
