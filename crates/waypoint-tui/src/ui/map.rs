//! Map surface
//!
//! Draws exactly what [`App::visible_features`] returns on a braille canvas
//! framed by the camera: the route polyline underneath, markers on top.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Line as Segment},
    },
};
use waypoint_app::{App, Camera, MarkerKind};

/// Margin around the camera bounds so edge markers stay readable.
const FRAME_MARGIN: f64 = 0.08;

const HOME_GLYPH: &str = "⌂";
const PLACE_GLYPH: &str = "●";

/// Render the map.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let features = app.visible_features();
    let bounds = app.camera().bounds().padded(FRAME_MARGIN);
    let title = match app.camera() {
        Camera::Region(_) => " Map ",
        Camera::Rect(_) => " Map (route) ",
    };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(symbols::Marker::Braille)
        .x_bounds([bounds.min_lon, bounds.max_lon])
        .y_bounds([bounds.min_lat, bounds.max_lat])
        .paint(|ctx| {
            if let Some(polyline) = &features.polyline {
                for pair in polyline.windows(2) {
                    ctx.draw(&Segment::new(
                        pair[0].lon(),
                        pair[0].lat(),
                        pair[1].lon(),
                        pair[1].lat(),
                        Color::Blue,
                    ));
                }
                ctx.layer();
            }

            for marker in &features.markers {
                let (glyph, style) = match marker.kind {
                    MarkerKind::Home => (HOME_GLYPH, Style::default().fg(Color::Cyan)),
                    MarkerKind::Place(_) if marker.selected => (
                        PLACE_GLYPH,
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                    MarkerKind::Place(_) => (PLACE_GLYPH, Style::default().fg(Color::Red)),
                };
                ctx.print(
                    marker.coordinate.lon(),
                    marker.coordinate.lat(),
                    Line::styled(format!("{glyph} {}", marker.label), style),
                );
            }
        });

    frame.render_widget(canvas, area);
}
