//! Result screen.
//!
//! On success, shows where the project landed, any warnings, and the
//! hotkeys of the installed editors. On failure, shows the error and the
//! only way out, which is back.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::titled_block;
use crate::project::ProjectOutcome;
use crate::settings::EditorKind;
use crate::tools::editor::Tool;
use crate::tui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    outcome: Option<&Result<ProjectOutcome, String>>,
    tools: &[Tool],
) {
    let lines = match outcome {
        Some(Ok(outcome)) => success_lines(theme, outcome, tools),
        Some(Err(message)) => vec![
            Line::from(Span::styled(
                "Failed",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(message.as_str(), Style::default().fg(theme.text))),
            Line::from(""),
            Line::from(Span::styled(
                "Esc to go back",
                Style::default().fg(theme.muted),
            )),
        ],
        None => Vec::new(),
    };

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Result", theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn success_lines<'a>(theme: &Theme, outcome: &'a ProjectOutcome, tools: &'a [Tool]) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "Ready: ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(outcome.name.as_str(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("Path:  ", Style::default().fg(theme.muted)),
            Span::raw(outcome.path.display().to_string()),
        ]),
    ];
    if !outcome.plan_written {
        lines.push(Line::from(Span::styled(
            "Kept the folder's existing plan",
            Style::default().fg(theme.muted),
        )));
    }
    for warning in &outcome.warnings {
        lines.push(Line::from(Span::styled(
            format!("Warning: {warning}"),
            Style::default().fg(theme.warning),
        )));
    }

    lines.push(Line::from(""));
    if tools.is_empty() {
        lines.push(Line::from(Span::styled(
            "No known editors found in PATH",
            Style::default().fg(theme.muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Open with:",
            Style::default().fg(theme.text),
        )));
        for tool in tools {
            let suffix = match tool.kind {
                EditorKind::Gui => "",
                EditorKind::Terminal => "  (in this terminal)",
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  [{}] ", tool.key),
                    Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(tool.label, Style::default().fg(theme.text)),
                Span::styled(suffix, Style::default().fg(theme.muted)),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to finish",
        Style::default().fg(theme.muted),
    )));
    lines
}
