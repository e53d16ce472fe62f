//! `irl adopt`: copy an existing folder into the workspace as a project.
//!
//! The source folder is left untouched. An existing plan file is kept;
//! otherwise one is written from the template.
//!
//! ## Usage
//!
//! ```bash
//! irl adopt ~/Downloads/field-notes
//! irl adopt ./old-analysis --rename 240110-old-analysis
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::init::print_outcome;
use super::workspace_dir;
use crate::project::{AdoptRequest, adopt_folder};
use crate::settings::ConfigStore;
use crate::templates::TemplateResolver;
use crate::templates::embedded::DEFAULT_TEMPLATE;

#[derive(Args)]
pub struct AdoptArgs {
    /// Folder to adopt.
    pub source: PathBuf,

    /// Folder name inside the workspace (defaults to the source's name).
    #[clap(long)]
    pub rename: Option<String>,

    /// Template for the plan, used only if the folder has none.
    #[clap(long, short, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Workspace to adopt into, instead of the configured default.
    #[clap(long)]
    pub dir: Option<PathBuf>,
}

/// Executes the `adopt` command.
///
/// # Errors
///
/// Returns an error if the source is missing, already inside the workspace,
/// or the destination already exists. Nothing is written in those cases.
pub async fn execute(args: &AdoptArgs) -> Result<()> {
    let store = ConfigStore::open()?;
    let base_dir = workspace_dir(args.dir.as_deref(), &store)?;
    let template = TemplateResolver::from_env()?
        .get_template(&args.template)
        .await?;

    let outcome = adopt_folder(&AdoptRequest {
        source: args.source.clone(),
        base_dir,
        rename: args.rename.clone(),
        template: template.content,
        profile: store.profile()?,
    })?;

    println!("Adopted '{}' into the workspace", outcome.name);
    print_outcome(&outcome);
    if outcome.plan_written {
        println!("  Plan: written from template '{}'", args.template);
    } else {
        println!("  Plan: kept the existing plan");
    }
    Ok(())
}
