//! `irl config`: workspace directory and plan editor settings.
//!
//! ## Usage
//!
//! ```bash
//! irl config show
//! irl config set-dir ~/research
//! irl config set-editor "code --wait" --gui
//! irl config set-editor nvim
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::errors::IrlError;
use crate::settings::{ConfigStore, EditorKind};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration.
    Show {
        /// Print the raw JSON.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },

    /// Set the default workspace directory.
    #[command(name = "set-dir")]
    SetDir {
        /// Directory holding your projects. Created on first use.
        path: PathBuf,
    },

    /// Set the editor used to open plans.
    #[command(name = "set-editor")]
    SetEditor {
        /// Editor command, e.g. `code --wait` or `nvim`.
        command: String,

        /// The editor opens its own window and should not block.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        gui: bool,
    },
}

/// Executes the `config` command.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or the
/// editor command is blank.
pub fn execute(args: &ConfigArgs) -> Result<()> {
    let store = ConfigStore::open()?;

    match &args.command {
        ConfigCommand::Show { json } => {
            let config = store.load()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            println!("Config file: {}", store.path().display());
            println!();
            match &config.default_directory {
                Some(dir) => println!("  default_directory: {}", dir.display()),
                None => println!("  default_directory: (not set)"),
            }
            match &config.plan_editor {
                Some(editor) => {
                    println!("  plan_editor:       {editor} ({})", config.plan_editor_type);
                }
                None => println!("  plan_editor:       (not set, using $VISUAL/$EDITOR)"),
            }
            let profile = if config.profile.is_set() {
                "set (irl profile show)"
            } else {
                "not set"
            };
            println!("  profile:           {profile}");
        }
        ConfigCommand::SetDir { path } => {
            let dir = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            store.set_default_directory(dir.clone())?;
            println!("Default directory set to {}", dir.display());
            if !dir.exists() {
                println!("It does not exist yet and will be created on first use.");
            }
        }
        ConfigCommand::SetEditor { command, gui } => {
            if command.trim().is_empty() {
                return Err(IrlError::invalid_arguments("editor command must not be empty").into());
            }
            let kind = if *gui {
                EditorKind::Gui
            } else {
                EditorKind::Terminal
            };
            store.set_plan_editor(command.trim(), kind)?;
            println!("Plan editor set to '{}' ({kind})", command.trim());
        }
    }

    Ok(())
}
