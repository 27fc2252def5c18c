//! Detail panel
//!
//! Shown while a place is selected: name, address, preview imagery and the
//! two actions.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use waypoint_app::{App, PreviewState, RoutePhase};

/// Rows taken by the panel, borders included.
pub const HEIGHT: u16 = 6;

const NO_PREVIEW: &str = "No preview found";
const LOADING_PREVIEW: &str = "Loading preview...";

/// Render the detail panel for the selected place.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(place) = app.search().selection() else {
        return;
    };

    let preview = match app.preview() {
        PreviewState::Ready(scene) => {
            Span::styled(scene.caption.clone(), Style::default().fg(Color::Green))
        },
        PreviewState::Loading { .. } => {
            Span::styled(LOADING_PREVIEW, Style::default().fg(Color::DarkGray))
        },
        PreviewState::Idle | PreviewState::Unavailable => {
            Span::styled(NO_PREVIEW, Style::default().fg(Color::DarkGray))
        },
    };

    let directions = match app.route().phase() {
        RoutePhase::Computing { .. } => "Finding route...".to_owned(),
        _ => format!("[d] Show Direction ({})", app.route().transport().label()),
    };

    let key_style = Style::default().fg(Color::Cyan);
    let lines = vec![
        Line::from(Span::raw(place.subtitle.clone())),
        Line::from(preview),
        Line::from(""),
        Line::from(vec![
            Span::styled("[o] Open in Maps", key_style),
            Span::raw("  "),
            Span::styled(directions, key_style),
        ]),
    ];

    let title_style = Style::default().add_modifier(Modifier::BOLD);
    let title = Span::styled(format!(" {} ", place.name), title_style);
    let block = Block::default().borders(Borders::ALL).title(title);
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
