//! Interactive terminal interface.
//!
//! Launched when `irl` runs without a subcommand in an interactive terminal.
//! It is skipped when `IRL_NO_TUI` is set (any value) or stdout is not a
//! terminal.
//!
//! ## Modules
//!
//! - [`terminal`] - RAII raw mode and alternate screen guard
//! - [`app`] - Application state and event loop
//! - [`wizard`] - Step engine shared by both wizards
//! - [`flow`] - The new-project and adopt flows
//! - [`browser`] - Directory browser
//! - [`tasks`] - Background jobs with generation stamps
//! - [`state`] - Screen and view state
//! - [`menu`] - Main menu
//! - [`theme`] - Color themes
//! - [`views`] - Rendering

pub mod app;
pub mod browser;
pub mod flow;
pub mod menu;
pub mod state;
pub mod tasks;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod wizard;

use std::io::IsTerminal;

use anyhow::{Context, Result};

use crate::settings::IrlPaths;
use terminal::TerminalGuard;
use wizard::PendingLaunch;

/// Environment variable that disables the TUI.
pub const NO_TUI_ENV: &str = "IRL_NO_TUI";

/// Whether the TUI should be used in this environment.
#[must_use]
pub fn should_use_tui() -> bool {
    if std::env::var_os(NO_TUI_ENV).is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Runs the TUI until the user quits.
///
/// When the user opens the new project in a terminal editor, the TUI is torn
/// down, the editor runs in the restored terminal, and the TUI starts again
/// once it exits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or the event loop fails.
pub fn run() -> Result<()> {
    if let Ok(paths) = IrlPaths::new()
        && let Err(e) = paths.ensure_directories()
    {
        tracing::warn!(error = %e, "cannot create irl directories");
    }

    loop {
        let pending = {
            let mut guard = TerminalGuard::new().context("failed to initialize terminal")?;
            app::run_app(&mut guard).context("TUI application error")?
        };

        match pending {
            Some(launch) => run_editor(&launch),
            None => break,
        }
    }

    Ok(())
}

fn run_editor(launch: &PendingLaunch) {
    if let Err(e) = launch.request.launch(&launch.target) {
        eprintln!("\nCould not run {}: {e:#}", launch.request.program);
        wait_for_enter();
    }
}

fn wait_for_enter() {
    use std::io::{BufRead, Write};

    print!("Press Enter to return to irl...");
    let _ = std::io::stdout().flush();
    let mut buffer = String::new();
    let _ = std::io::stdin().lock().read_line(&mut buffer);
}
