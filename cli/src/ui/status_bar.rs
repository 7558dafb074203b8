use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::input::keys;
use crate::theme::ThemeColors;

use super::utils::format_since;

pub fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let left_spans = vec![
        Span::styled(" vitals ", Style::default().fg(theme.accent)),
        Span::styled(format!("v{}", super::VERSION), Style::default().fg(theme.muted)),
    ];

    let right_text = format!("{} ", app.export_path());

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width = right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, Style::default().fg(theme.muted)));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg));
    frame.render_widget(bar, area);
}

fn key_hints(appearance: &str) -> Vec<(&'static str, String)> {
    vec![
        (keys::SYNC, "sync".to_string()),
        (keys::CANCEL, "cancel".to_string()),
        (keys::HELP, "help".to_string()),
        (
            keys::APPEARANCE,
            format!("appearance ({})", appearance.to_lowercase()),
        ),
        (keys::QUIT, "quit".to_string()),
    ]
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let left_hints = key_hints(app.config.appearance_label());

    let mut left_spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in left_hints.iter().enumerate() {
        if i > 0 {
            left_spans.push(Span::styled(" │ ", Style::default().fg(theme.border)));
        }
        left_spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        left_spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(theme.muted),
        ));
    }

    let phase_color = if app.sync.is_syncing() {
        theme.warning
    } else {
        theme.muted
    };

    let mut right_spans: Vec<Span> = vec![
        Span::styled("sync: ", Style::default().fg(theme.muted)),
        Span::styled(app.sync.phase.label(), Style::default().fg(phase_color)),
    ];
    if let Some(completed_at) = app.sync.completed_at {
        right_spans.push(Span::styled(" │ ", Style::default().fg(theme.border)));
        right_spans.push(Span::styled(
            format!(
                "updated {} ({} ago) ",
                completed_at.format("%H:%M:%S"),
                format_since(completed_at, Local::now())
            ),
            Style::default().fg(theme.success),
        ));
    } else {
        right_spans.push(Span::raw(" "));
    }

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    left_spans.push(Span::raw(" ".repeat(padding)));
    left_spans.extend(right_spans);

    let bar = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(theme.bg))
        .alignment(Alignment::Left);

    frame.render_widget(bar, area);
}
