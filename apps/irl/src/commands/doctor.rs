//! `irl doctor`: check the environment irl depends on.
//!
//! Reports on git, the config file, the workspace, the template cache and
//! the available editors. Checks never abort the command; the summary line
//! says whether anything needs attention.

use anyhow::Result;

use crate::settings::IrlPaths;
use crate::tools::doctor::{DoctorCheckStatus, run_all_checks};

/// Executes the `doctor` command.
///
/// # Errors
///
/// Returns an error only if the irl home directory cannot be determined.
pub fn execute() -> Result<()> {
    let paths = IrlPaths::new()?;
    println!("Checking irl setup in {}...", paths.root.display());
    println!();

    let checks = run_all_checks(&paths);
    let mut has_errors = false;
    let mut has_warnings = false;

    for check in &checks {
        println!("  {} {}: {}", check.prefix(), check.name, check.message);
        match check.status {
            DoctorCheckStatus::Ok => {}
            DoctorCheckStatus::Warning => has_warnings = true,
            DoctorCheckStatus::Error => has_errors = true,
        }
    }

    println!();
    if has_errors {
        println!("Some checks failed. Fix the items marked [FAIL] above.");
    } else if has_warnings {
        println!("irl works, but some features are limited. See [WARN] above.");
    } else {
        println!("All checks passed.");
    }
    Ok(())
}
