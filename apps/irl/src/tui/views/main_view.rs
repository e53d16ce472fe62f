//! Main screen: menu, workspace summary and recent projects.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::titled_block;
use crate::tui::menu::{MENU_ITEMS, Menu};
use crate::tui::state::HomeState;
use crate::tui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    menu: &Menu,
    home: &HomeState,
    status_message: &str,
) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(u16::try_from(MENU_ITEMS.len()).unwrap_or(3) + 4),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, chunks[0], theme, home);
    render_menu(frame, chunks[1], theme, menu);
    render_recent(frame, chunks[2], theme, home);
    render_status(frame, chunks[3], theme, home, status_message);
}

fn render_header(frame: &mut Frame, area: Rect, theme: &Theme, home: &HomeState) {
    let workspace = home.workspace.as_ref().map_or_else(
        || Span::styled("not set (irl config set-dir <PATH>)", Style::default().fg(theme.warning)),
        |dir| Span::raw(dir.display().to_string()),
    );

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "irl",
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(theme.muted),
            ),
        ]),
        Line::from(Span::styled(
            "Research project folders",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Workspace: ", Style::default().fg(theme.muted)),
            workspace,
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut Frame, area: Rect, theme: &Theme, menu: &Menu) {
    let mut lines = Vec::with_capacity(MENU_ITEMS.len() + 2);

    for (idx, item) in MENU_ITEMS.iter().enumerate() {
        let is_selected = idx == menu.selected();
        let prefix = if is_selected { "> " } else { "  " };
        let key_color = if is_selected {
            theme.selected
        } else {
            theme.highlight
        };
        let label_style = if is_selected {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, label_style),
            Span::styled(
                format!("[{}] ", item.key),
                Style::default().fg(key_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(item.label, label_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Arrows or shortcut keys to choose, Enter to select",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Menu", theme)),
        area,
    );
}

fn render_recent(frame: &mut Frame, area: Rect, theme: &Theme, home: &HomeState) {
    let now = Local::now();
    let mut lines = Vec::new();

    if let Some(error) = &home.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(theme.error),
        )));
    } else if home.recent.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No projects yet",
            Style::default().fg(theme.muted),
        )));
    } else {
        for project in &home.recent {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<40}", project.name),
                    Style::default().fg(theme.text),
                ),
                Span::styled(project.age_label(now), Style::default().fg(theme.muted)),
            ]));
        }
        if home.total > home.recent.len() {
            lines.push(Line::from(Span::styled(
                format!("  and {} more (irl list)", home.total - home.recent.len()),
                Style::default().fg(theme.muted),
            )));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Recent projects", theme)),
        area,
    );
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    home: &HomeState,
    status_message: &str,
) {
    let (text, color) = if status_message.is_empty() {
        (
            home.template_notice.as_deref().unwrap_or_default(),
            theme.highlight,
        )
    } else {
        (status_message, theme.muted)
    };
    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}
