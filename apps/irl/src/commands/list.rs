//! `irl list`: list projects in the workspace, newest first.

use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use super::workspace_dir;
use crate::project::{Project, scan};
use crate::settings::ConfigStore;

#[derive(Args)]
pub struct ListArgs {
    /// Print JSON instead of a table.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,

    /// Workspace to list, instead of the configured default.
    #[clap(long)]
    pub dir: Option<PathBuf>,
}

/// Executes the `list` command.
///
/// # Errors
///
/// Returns an error if no workspace is known or it cannot be read.
pub fn execute(args: &ListArgs) -> Result<()> {
    let store = ConfigStore::open()?;
    let base_dir = workspace_dir(args.dir.as_deref(), &store)?;
    let projects = if base_dir.exists() {
        scan(&base_dir)?
    } else {
        Vec::new()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects found in {}", base_dir.display());
        println!("Create one with 'irl init <PURPOSE>'.");
        return Ok(());
    }

    print!("{}", format_table(&projects));
    Ok(())
}

fn format_table(projects: &[Project]) -> String {
    let now = Local::now();
    let width = projects
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<width$}  {:<14}  PATH\n", "NAME", "MODIFIED");
    for project in projects {
        out.push_str(&format!(
            "{:<width$}  {:<14}  {}\n",
            project.name,
            project.age_label(now),
            project.path.display()
        ));
    }
    out
}
