//! Screen rendering.
//!
//! - [`main_view`] - Menu, workspace and recent projects
//! - [`wizard_view`] - Wizard frame and the simple steps
//! - [`browse_view`] - Directory browser
//! - [`template_view`] - Template picker
//! - [`done_view`] - Result screen with editor hotkeys

pub mod browse_view;
pub mod done_view;
pub mod main_view;
pub mod template_view;
pub mod wizard_view;

use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::theme::Theme;

/// Bordered block with a padded title.
fn titled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
}
