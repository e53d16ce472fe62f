//! Editors and tools for opening a project.
//!
//! GUI tools are spawned detached and return immediately. Terminal tools
//! take over the terminal and are waited on, so callers running a TUI must
//! leave raw mode before launching one.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::IrlError;
use crate::project::find_marker;
use crate::settings::EditorKind;

/// A tool irl knows how to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Single-letter hotkey in the post-creation menu.
    pub key: char,
    pub label: &'static str,
    pub program: &'static str,
    /// Arguments placed before the target path.
    pub args: &'static [&'static str],
    pub kind: EditorKind,
}

impl Tool {
    const fn gui(key: char, label: &'static str, program: &'static str) -> Self {
        Self {
            key,
            label,
            program,
            args: &[],
            kind: EditorKind::Gui,
        }
    }

    const fn terminal(
        key: char,
        label: &'static str,
        program: &'static str,
        args: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            label,
            program,
            args,
            kind: EditorKind::Terminal,
        }
    }

    /// The launch request for this tool.
    #[must_use]
    pub fn request(&self) -> LaunchRequest {
        LaunchRequest {
            program: self.program.to_string(),
            args: self.args.iter().map(ToString::to_string).collect(),
            kind: self.kind,
        }
    }
}

#[cfg(target_os = "macos")]
const FILE_MANAGER: &str = "open";
#[cfg(windows)]
const FILE_MANAGER: &str = "explorer";
#[cfg(not(any(target_os = "macos", windows)))]
const FILE_MANAGER: &str = "xdg-open";

/// Every tool offered, in menu order.
pub const KNOWN_TOOLS: &[Tool] = &[
    Tool::gui('c', "VS Code", "code"),
    Tool::gui('u', "Cursor", "cursor"),
    Tool::gui('z', "Zed", "zed"),
    Tool::terminal('v', "Vim", "vim", &[]),
    Tool::terminal('n', "Neovim", "nvim", &[]),
    Tool::terminal('e', "Emacs", "emacs", &["-nw"]),
    Tool::gui('f', "File manager", FILE_MANAGER),
];

/// Tools whose program is found in `PATH`.
#[must_use]
pub fn detect_installed() -> Vec<Tool> {
    KNOWN_TOOLS
        .iter()
        .copied()
        .filter(|tool| which::which(tool.program).is_ok())
        .collect()
}

/// Finds a known tool by hotkey among `tools`.
#[must_use]
pub fn find_by_key(tools: &[Tool], key: char) -> Option<Tool> {
    tools.iter().copied().find(|tool| tool.key == key)
}

/// Returns `$VISUAL` or `$EDITOR`, ignoring empty values.
#[must_use]
pub fn env_editor() -> Option<String> {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Path to hand to a tool of `kind` for `project`.
///
/// GUI tools get the folder. Terminal editors get the plan file when the
/// project has one, since most of them cannot do much with a directory.
#[must_use]
pub fn open_target(kind: EditorKind, project: &Path) -> PathBuf {
    match kind {
        EditorKind::Gui => project.to_path_buf(),
        EditorKind::Terminal => find_marker(project).unwrap_or_else(|| project.to_path_buf()),
    }
}

/// A program invocation that opens a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub args: Vec<String>,
    pub kind: EditorKind,
}

impl LaunchRequest {
    /// Parses a whitespace-separated command line such as `code --wait`.
    ///
    /// Returns `None` for a blank command.
    #[must_use]
    pub fn from_command(command: &str, kind: EditorKind) -> Option<Self> {
        let mut parts = command.split_whitespace().map(ToString::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            kind,
        })
    }

    /// Opens `target` with this program.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the program is not installed, `IoError` if it
    /// cannot be started, and `InvalidArguments` if a terminal program exits
    /// unsuccessfully.
    pub fn launch(&self, target: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(target);
        tracing::info!(
            program = %self.program,
            kind = %self.kind,
            target = %target.display(),
            "launching"
        );

        let spawn_error = |e: std::io::Error| -> anyhow::Error {
            if e.kind() == std::io::ErrorKind::NotFound {
                IrlError::not_found(format!("program '{}'", self.program)).into()
            } else {
                IrlError::io_error(format!("Failed to start {}", self.program), e).into()
            }
        };

        match self.kind {
            EditorKind::Gui => {
                command
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map_err(spawn_error)?;
            }
            EditorKind::Terminal => {
                let status = command.status().map_err(spawn_error)?;
                if !status.success() {
                    return Err(IrlError::invalid_arguments(format!(
                        "{} exited with status {}",
                        self.program,
                        status.code().unwrap_or(-1)
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }
}
