use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use vitals_protocol::DailyAggregate;

use crate::app::App;
use crate::theme::ThemeColors;

const EMPTY: &str = "-";

/// Label and display value for each of the nine aggregate fields.
pub fn metric_rows(aggregate: Option<&DailyAggregate>) -> Vec<(&'static str, String)> {
    let Some(a) = aggregate else {
        return [
            "Steps",
            "Heart rate",
            "Calories",
            "Distance",
            "Active calories",
            "Sleep",
            "Deep sleep",
            "REM sleep",
            "Light sleep",
        ]
        .into_iter()
        .map(|label| (label, EMPTY.to_string()))
        .collect();
    };

    vec![
        ("Steps", steps(a)),
        ("Heart rate", heart_rate(a)),
        ("Calories", format!("{:.1} kcal", a.total_calories_kcal)),
        ("Distance", distance(a.distance_meters)),
        ("Active calories", format!("{:.1} kcal", a.active_calories_kcal)),
        ("Sleep", DailyAggregate::format_minutes(a.total_sleep_minutes)),
        ("Deep sleep", DailyAggregate::format_minutes(a.deep_sleep_minutes)),
        ("REM sleep", DailyAggregate::format_minutes(a.rem_sleep_minutes)),
        ("Light sleep", DailyAggregate::format_minutes(a.light_sleep_minutes)),
    ]
}

fn steps(a: &DailyAggregate) -> String {
    if a.step_counts.is_empty() {
        EMPTY.to_string()
    } else {
        a.steps_display()
    }
}

fn heart_rate(a: &DailyAggregate) -> String {
    let count = a.heart_rate_samples.len();
    match a.latest_heart_rate() {
        Some(point) => format!("{:.0} bpm at {} ({} records)", point.bpm, point.time, count),
        None if count > 0 => format!("no samples ({} records)", count),
        None => EMPTY.to_string(),
    }
}

fn distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}

pub fn render_metrics(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::default()
        .title(" Today ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg));

    let aggregate = app.sync.aggregate.as_deref();
    if aggregate.is_none() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("No data yet. Press ", Style::default().fg(theme.muted)),
                Span::styled(
                    crate::input::keys::SYNC,
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to sync.", Style::default().fg(theme.muted)),
            ]),
        ])
        .centered()
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let rows: Vec<Row> = metric_rows(aggregate)
        .into_iter()
        .map(|(label, value)| {
            Row::new(vec![
                Cell::from(Span::styled(label, Style::default().fg(theme.muted))),
                Cell::from(Span::styled(
                    value,
                    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                )),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(10)])
        .column_spacing(2)
        .block(block);

    frame.render_widget(table, area);
}
