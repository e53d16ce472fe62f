//! Template picker rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::titled_block;
use crate::tui::state::TemplateListState;
use crate::tui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    templates: &TemplateListState,
    spinner: &str,
) {
    let chunks = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let mut lines = vec![row(
        theme,
        templates.selected == 0,
        "default",
        "Built-in research plan (used when nothing else is chosen)",
    )];
    for (index, template) in templates.templates.iter().enumerate() {
        lines.push(row(
            theme,
            templates.selected == index + 1,
            &template.name,
            &template.description,
        ));
    }

    // Keep the selected row inside the box.
    let inner_height = usize::from(chunks[0].height.saturating_sub(2)).max(1);
    let scroll = templates.selected.saturating_sub(inner_height - 1);
    let list = Paragraph::new(lines)
        .block(titled_block("Template", theme))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(list, chunks[0]);

    let notice = if templates.loading {
        Line::from(Span::styled(
            format!("{spinner} Loading templates..."),
            Style::default().fg(theme.highlight),
        ))
    } else if let Some(notice) = &templates.notice {
        Line::from(Span::styled(notice.as_str(), Style::default().fg(theme.warning)))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(notice), chunks[1]);

    let hint = Paragraph::new("Up/Down move  r refresh  Enter create  Esc back")
        .style(Style::default().fg(theme.muted));
    frame.render_widget(hint, chunks[2]);
}

fn row<'a>(theme: &Theme, selected: bool, name: &'a str, description: &'a str) -> Line<'a> {
    let name_style = if selected {
        Style::default()
            .fg(theme.selected)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    Line::from(vec![
        Span::styled(if selected { "> " } else { "  " }, name_style),
        Span::styled(format!("{name:<20}"), name_style),
        Span::styled(description, Style::default().fg(theme.muted)),
    ])
}
