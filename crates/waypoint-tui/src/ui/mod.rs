//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.

mod map;
mod panel;
mod results;
mod search;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use waypoint_app::{App, InputState};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 5;
    const SEARCH_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [search_area, main_area, status_area] = chunks.as_ref() else {
        return;
    };

    search::render(frame, app, input, *search_area);
    render_main_area(frame, app, *main_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (results sidebar + map, detail panel below the map).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const RESULTS_SIDEBAR_WIDTH: u16 = 28;
    const MAP_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(RESULTS_SIDEBAR_WIDTH), Constraint::Min(MAP_MIN_WIDTH)])
        .split(area);

    let [results_area, map_column] = chunks.as_ref() else {
        return;
    };

    results::render(frame, app, *results_area);

    if app.detail_visible() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(panel::HEIGHT)])
            .split(*map_column);
        let [map_area, panel_area] = chunks.as_ref() else {
            return;
        };
        map::render(frame, app, *map_area);
        panel::render(frame, app, *panel_area);
    } else {
        map::render(frame, app, *map_column);
    }
}
