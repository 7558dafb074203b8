mod help;
mod metrics;
mod status_bar;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, AppView};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.current_theme();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    status_bar::render_title_bar(frame, chunks[0], app, &theme);
    metrics::render_metrics(frame, chunks[1], app, &theme);
    status_bar::render_status_bar(frame, chunks[2], app, &theme);

    if app.view == AppView::Help {
        help::render_help(frame, app, &theme);
    }
}
