use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::input::KEY_BINDINGS;
use crate::theme::ThemeColors;

use super::utils::centered_rect;

pub fn render_help(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let content_height = KEY_BINDINGS.len() as u16 + 10;
    let area = centered_rect(frame.area(), 60, content_height);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.dialog_bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .margin(1)
        .split(inner);

    let title = Paragraph::new(vec![
        Line::from(vec![Span::styled(
            "vitals - daily health sync",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::styled(
            format!("Appearance: {}", app.config.appearance_label()),
            Style::default().fg(theme.muted),
        )]),
    ])
    .centered();

    frame.render_widget(title, chunks[0]);

    let lines: Vec<Line> = KEY_BINDINGS
        .iter()
        .map(|binding| {
            Line::from(vec![
                Span::styled(
                    format!("{:12}", binding.key),
                    Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(binding.description, Style::default().fg(theme.fg)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), chunks[1]);
}
