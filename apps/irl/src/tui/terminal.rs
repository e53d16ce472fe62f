//! Raw mode and alternate screen handling.
//!
//! [`TerminalGuard`] puts the terminal into TUI mode on creation and restores
//! it on drop, including when the event loop returns early with an error.
//! The wizard drops the guard before handing the terminal to an editor like
//! vim and creates a new one afterwards.

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// RAII guard owning the TUI terminal.
pub struct TerminalGuard {
    pub terminal: TuiTerminal,
}

impl TerminalGuard {
    /// Enables raw mode and enters the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched into TUI mode.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("failed to create terminal")?;

        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_creation_without_tty_does_not_panic() {
        // Fails without a TTY; only the absence of a panic matters here.
        let result = TerminalGuard::new();
        drop(result);
    }
}
