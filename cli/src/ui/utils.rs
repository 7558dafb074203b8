use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::layout::Rect;

/// Center a fixed-size rectangle within an area (clamped to fit).
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Whole-second age of `then`, e.g. "2m 5s". Future times read as "0s".
pub fn format_since(then: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs = (now - then).num_seconds().max(0) as u64;
    humantime::format_duration(Duration::from_secs(secs)).to_string()
}
