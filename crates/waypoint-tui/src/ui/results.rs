//! Results sidebar
//!
//! Lists the places currently on the map. In overlay mode that is only the
//! route destination.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use waypoint_app::{App, MarkerKind};

const SELECTED_PREFIX: &str = "> ";
const NORMAL_PREFIX: &str = "  ";

/// Render the results sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let features = app.visible_features();

    let items: Vec<ListItem> = features
        .markers
        .iter()
        .filter(|marker| matches!(marker.kind, MarkerKind::Place(_)))
        .map(|marker| {
            let (prefix, style) = if marker.selected {
                (SELECTED_PREFIX, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                (NORMAL_PREFIX, Style::default())
            };
            let label = Span::styled(marker.label.clone(), style);
            ListItem::new(Line::from(vec![Span::raw(prefix), label]))
        })
        .collect();

    let title = if app.search().is_searching() {
        " Results (searching...) ".to_owned()
    } else if app.route().overlay_active() {
        " Route ".to_owned()
    } else {
        format!(" Results ({}) ", items.len())
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}
