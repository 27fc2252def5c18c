//! Status bar
//!
//! Shows the latest status message, or key hints when there is none, and the
//! transport used for the next directions request.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use waypoint_app::App;

const BROWSE_HINT: &str = "Enter search | Up/Down select | Esc quit";
const PANEL_HINT: &str = "d directions | o open | w walk | c drive | Esc close";
const OVERLAY_HINT: &str = "Esc leave route | Up/Down select";

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if app.detail_visible() {
        PANEL_HINT
    } else if app.route().overlay_active() || app.route().is_computing() {
        OVERLAY_HINT
    } else {
        BROWSE_HINT
    };
    let message = app.status_message().unwrap_or(hint);

    let status_line = Line::from(vec![
        Span::raw(" "),
        Span::raw(message.to_owned()),
        Span::styled(
            format!(" | {}", app.route().transport().label()),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}
