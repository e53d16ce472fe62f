//! `irl update`: refresh the template cache from the remote source.

use anyhow::Result;

use crate::templates::TemplateResolver;

/// Executes the `update` command.
///
/// # Errors
///
/// Returns an error if the remote listing cannot be fetched. The existing
/// cache is left as it was.
pub async fn execute() -> Result<()> {
    let resolver = TemplateResolver::from_env()?;
    println!("Fetching templates...");

    let report = resolver.update().await?;
    println!(
        "Updated {} template(s) in {}",
        report.templates.len(),
        resolver.cache().dir().display()
    );
    for template in &report.templates {
        println!("  {}", template.name);
    }
    if !report.skipped.is_empty() {
        eprintln!("Warning: skipped {}", report.skipped.join(", "));
    }
    Ok(())
}
