//! Screen and view state.

use std::path::PathBuf;

use crate::project::{Project, scan};
use crate::templates::Template;
use crate::templates::embedded::DEFAULT_TEMPLATE;

/// Active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    Wizard,
}

/// Recent projects shown on the main screen.
pub const RECENT_LIMIT: usize = 5;

/// Main screen contents.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub workspace: Option<PathBuf>,
    /// Most recent projects, newest first.
    pub recent: Vec<Project>,
    pub total: usize,
    /// Set when the workspace could not be scanned.
    pub error: Option<String>,
    /// Result of the background check for new templates.
    pub template_notice: Option<String>,
}

impl HomeState {
    /// Rescans `workspace` for recent projects.
    pub fn load(&mut self, workspace: Option<PathBuf>) {
        self.recent.clear();
        self.total = 0;
        self.error = None;
        if let Some(dir) = &workspace
            && dir.exists()
        {
            match scan(dir) {
                Ok(projects) => {
                    self.total = projects.len();
                    self.recent = projects.into_iter().take(RECENT_LIMIT).collect();
                }
                Err(e) => self.error = Some(e.to_string()),
            }
        }
        self.workspace = workspace;
    }
}

/// Template picker contents.
///
/// Row 0 is always the default template. Rows `1..` are the loaded
/// templates, with any template named `default` left out since row 0 already
/// stands for it.
#[derive(Debug, Clone, Default)]
pub struct TemplateListState {
    pub templates: Vec<Template>,
    pub selected: usize,
    pub loading: bool,
    pub loaded: bool,
    /// Last refresh error or notice.
    pub notice: Option<String>,
}

impl TemplateListState {
    /// Replaces the list, keeping the selection on the same name if present.
    pub fn set_templates(&mut self, templates: Vec<Template>) {
        let previous = self.selected_name().map(ToString::to_string);
        self.templates = templates
            .into_iter()
            .filter(|t| t.name != DEFAULT_TEMPLATE)
            .collect();
        self.selected = previous
            .and_then(|name| self.templates.iter().position(|t| t.name == name))
            .map_or(0, |index| index + 1);
        self.loading = false;
        self.loaded = true;
    }

    /// Number of rows including the default row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len() + 1
    }

    /// Template chosen by the current row, `None` for the default row.
    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .checked_sub(1)
            .and_then(|index| self.templates.get(index))
            .map(|t| t.name.as_str())
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.len() - 1);
    }
}

/// Single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
}

impl TextInput {
    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Progress indicator advanced once per event loop tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    tick: usize,
}

impl Spinner {
    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    #[must_use]
    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }
}
