//! `irl init`: create a new project folder.
//!
//! ## Usage
//!
//! ```bash
//! irl init effects of sleep on memory          # -> 250307-effects-sleep-memory
//! irl init --name pilot-study --template experiment
//! irl init survey design --dir ~/scratch --no-git
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::workspace_dir;
use crate::errors::IrlError;
use crate::project::{CreateRequest, ProjectOutcome, create_project, generate_name_today};
use crate::settings::ConfigStore;
use crate::templates::TemplateResolver;
use crate::templates::embedded::DEFAULT_TEMPLATE;

#[derive(Args)]
pub struct InitArgs {
    /// What the project is about. Used to derive the `YYMMDD-slug` name.
    pub purpose: Vec<String>,

    /// Exact folder name, instead of deriving one from the purpose.
    #[clap(long)]
    pub name: Option<String>,

    /// Plan template to use.
    #[clap(long, short, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Workspace to create the project in, instead of the configured default.
    #[clap(long)]
    pub dir: Option<PathBuf>,

    /// Skip git repository initialization.
    #[clap(long = "no-git", action = clap::ArgAction::SetTrue)]
    pub no_git: bool,
}

/// Executes the `init` command.
///
/// # Errors
///
/// Returns an error if neither a purpose nor `--name` is given, no workspace
/// is known, the template cannot be resolved, or the folder already exists.
pub async fn execute(args: &InitArgs) -> Result<()> {
    let purpose = args.purpose.join(" ");
    let name = match &args.name {
        Some(name) => name.clone(),
        None if purpose.trim().is_empty() => {
            return Err(IrlError::invalid_arguments(
                "describe the project (irl init <PURPOSE>...) or pass --name",
            )
            .into());
        }
        None => generate_name_today(&purpose),
    };

    let store = ConfigStore::open()?;
    let base_dir = workspace_dir(args.dir.as_deref(), &store)?;
    let template = TemplateResolver::from_env()?
        .get_template(&args.template)
        .await?;

    let outcome = create_project(&CreateRequest {
        base_dir,
        name,
        template: template.content,
        profile: store.profile()?,
        git: !args.no_git,
    })?;

    println!("Created project '{}'", outcome.name);
    print_outcome(&outcome);
    println!();
    println!("Next steps:");
    println!("  irl open {}", outcome.name);
    Ok(())
}

/// Prints the location and warnings shared by `init` and `adopt`.
pub(crate) fn print_outcome(outcome: &ProjectOutcome) {
    println!("  Path: {}", outcome.path.display());
    for warning in &outcome.warnings {
        eprintln!("Warning: {warning}");
    }
}
