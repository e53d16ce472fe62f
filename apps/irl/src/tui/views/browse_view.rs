//! Directory browser rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::titled_block;
use crate::tui::browser::DirBrowser;
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme, browser: &DirBrowser, title: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let location = Line::from(vec![
        Span::styled("In: ", Style::default().fg(theme.muted)),
        Span::styled(
            browser.current().display().to_string(),
            Style::default().fg(theme.highlight),
        ),
        Span::styled(
            format!("  (sorted by {})", browser.sort().label()),
            Style::default().fg(theme.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(location), chunks[0]);

    let mut lines = Vec::new();
    if let Some(error) = &browser.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(theme.error),
        )));
    } else if browser.entries().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No subfolders",
            Style::default().fg(theme.muted),
        )));
    }
    for (index, entry) in browser.visible() {
        let is_selected = index == browser.cursor();
        let style = if is_selected {
            Style::default()
                .fg(theme.selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let mut spans = vec![
            Span::styled(if is_selected { "> " } else { "  " }, style),
            Span::styled(format!("{}/", entry.name), style),
        ];
        if entry.is_project {
            spans.push(Span::styled(
                "  [project]",
                Style::default().fg(theme.project),
            ));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(
        Paragraph::new(lines).block(titled_block(title, theme)),
        chunks[1],
    );

    let hint = Paragraph::new("Up/Down move  Right open  Left parent  s sort  Enter choose  Esc back")
        .style(Style::default().fg(theme.muted));
    frame.render_widget(hint, chunks[2]);
}
