//! `irl open`: open a project in an editor.
//!
//! The editor is taken from `--editor`, then the configured plan editor,
//! then `$VISUAL` or `$EDITOR`. GUI editors receive the project folder;
//! terminal editors receive the plan file.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::workspace_dir;
use crate::errors::IrlError;
use crate::project::scanner::find_project;
use crate::settings::{Config, ConfigStore, EditorKind};
use crate::tools::editor::{LaunchRequest, env_editor, open_target};

#[derive(Args)]
pub struct OpenArgs {
    /// Project folder name, as shown by `irl list`.
    pub name: String,

    /// Editor command to use this time, e.g. `code` or `nvim`.
    #[clap(long)]
    pub editor: Option<String>,

    /// Treat `--editor` as a GUI program that should not block.
    #[clap(long, requires = "editor", action = clap::ArgAction::SetTrue)]
    pub gui: bool,

    /// Workspace to look in, instead of the configured default.
    #[clap(long)]
    pub dir: Option<PathBuf>,
}

/// Executes the `open` command.
///
/// # Errors
///
/// Returns an error if the project does not exist, no editor is known, or
/// the editor cannot be started.
pub fn execute(args: &OpenArgs) -> Result<()> {
    let store = ConfigStore::open()?;
    let base_dir = workspace_dir(args.dir.as_deref(), &store)?;
    let project = find_project(&base_dir, &args.name)?;

    let request = choose_editor(args, &store.load()?, env_editor()).ok_or_else(|| {
        IrlError::config_error(
            "no editor configured. Run 'irl config set-editor <CMD>' or set $EDITOR.",
        )
    })?;

    let target = open_target(request.kind, &project.path);
    println!("Opening {} with {}", target.display(), request.program);
    request.launch(&target)
}

fn choose_editor(args: &OpenArgs, config: &Config, env: Option<String>) -> Option<LaunchRequest> {
    if let Some(command) = &args.editor {
        let kind = if args.gui {
            EditorKind::Gui
        } else {
            EditorKind::Terminal
        };
        return LaunchRequest::from_command(command, kind);
    }
    if let Some(command) = &config.plan_editor {
        return LaunchRequest::from_command(command, config.plan_editor_type);
    }
    env.and_then(|command| LaunchRequest::from_command(&command, EditorKind::Terminal))
}
