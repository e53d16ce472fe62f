//! `irl templates`: list the plan templates available to `irl init`.
//!
//! Uses the fresh cache, else a remote fetch, else the built-in templates,
//! so it always prints something.

use anyhow::Result;
use clap::Args;

use crate::templates::{Template, TemplateResolver};

#[derive(Args)]
pub struct TemplatesArgs {
    /// Print JSON instead of a table.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

/// Executes the `templates` command.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built or the output
/// cannot be serialized; fetch failures fall back silently.
pub async fn execute(args: &TemplatesArgs) -> Result<()> {
    let templates = TemplateResolver::from_env()?.list_templates().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
    } else {
        print!("{}", format_table(&templates));
        println!();
        println!("Use one with 'irl init <PURPOSE> --template <NAME>'.");
    }
    Ok(())
}

fn format_table(templates: &[Template]) -> String {
    let width = templates
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let mut out = format!("{:<width$}  DESCRIPTION\n", "NAME");
    for template in templates {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            template.name, template.description
        ));
    }
    out
}
