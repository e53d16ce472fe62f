//! Wizard frame: heading, current step body, status line.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{browse_view, done_view, template_view, titled_block};
use crate::tui::flow::Step;
use crate::tui::tasks::TaskRunner;
use crate::tui::theme::Theme;
use crate::tui::wizard::Wizard;

pub fn render<R: TaskRunner>(frame: &mut Frame, area: Rect, theme: &Theme, wizard: &Wizard<R>) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_heading(frame, chunks[0], theme, wizard);

    let body = chunks[1];
    match wizard.step() {
        Step::Directory => match wizard.browser() {
            Some(browser) => browse_view::render(frame, body, theme, browser, "Choose workspace"),
            None => render_directory(frame, body, theme, wizard),
        },
        Step::Source => {
            if let Some(browser) = wizard.browser() {
                browse_view::render(frame, body, theme, browser, "Choose folder to adopt");
            }
        }
        Step::Purpose => render_purpose(frame, body, theme, wizard),
        Step::Template => template_view::render(
            frame,
            body,
            theme,
            wizard.templates(),
            wizard.spinner_frame(),
        ),
        Step::Working => render_working(frame, body, theme, wizard),
        Step::Done => done_view::render(frame, body, theme, wizard.outcome(), wizard.tools()),
    }

    let status = Paragraph::new(wizard.status().unwrap_or_default())
        .style(Style::default().fg(theme.warning));
    frame.render_widget(status, chunks[2]);
}

fn render_heading<R: TaskRunner>(frame: &mut Frame, area: Rect, theme: &Theme, wizard: &Wizard<R>) {
    let mut spans = vec![Span::styled(
        wizard.title(),
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some((current, total)) = wizard.progress() {
        spans.push(Span::styled(
            format!("  step {current} of {total}"),
            Style::default().fg(theme.muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_directory<R: TaskRunner>(frame: &mut Frame, area: Rect, theme: &Theme, wizard: &Wizard<R>) {
    let current = wizard.data().directory.as_ref().map_or_else(
        || Span::styled("none configured", Style::default().fg(theme.warning)),
        |dir| Span::styled(dir.display().to_string(), Style::default().fg(theme.text)),
    );
    let lines = vec![
        Line::from(vec![
            Span::styled("Workspace: ", Style::default().fg(theme.muted)),
            current,
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to continue  b browse  Esc cancel",
            Style::default().fg(theme.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Where should the project go?", theme)),
        area,
    );
}

fn render_purpose<R: TaskRunner>(frame: &mut Frame, area: Rect, theme: &Theme, wizard: &Wizard<R>) {
    let input = wizard.purpose();
    let lines = vec![
        Line::from(Span::styled(
            "What is this project about?",
            Style::default().fg(theme.muted),
        )),
        Line::from(Span::styled(
            format!("> {}", input.value),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Folder: ", Style::default().fg(theme.muted)),
            Span::styled(wizard.name_preview(), Style::default().fg(theme.highlight)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to continue  Esc back",
            Style::default().fg(theme.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Purpose", theme)),
        area,
    );

    let typed = u16::try_from(input.value.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(3).saturating_add(typed);
    if area.height > 2 && x < area.right() {
        frame.set_cursor_position(Position::new(x, area.y + 2));
    }
}

fn render_working<R: TaskRunner>(frame: &mut Frame, area: Rect, theme: &Theme, wizard: &Wizard<R>) {
    let target = wizard.target_name().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Setting up {target}...", wizard.spinner_frame()),
            Style::default().fg(theme.highlight),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to go back (the result will be ignored)",
            Style::default().fg(theme.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Working", theme)),
        area,
    );
}
