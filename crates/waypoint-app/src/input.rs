//! Terminal-agnostic keyboard input.
//!
//! [`InputState`] owns the search box (buffer and cursor) and turns key
//! presses into [`AppEvent`]s. Key meaning depends on whether the detail
//! panel is open, so the current [`App`] is consulted but never mutated.

use waypoint_core::TransportType;

use crate::{App, AppEvent};

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (next result).
    Tab,
    /// Escape key (close panel, leave route, quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Search box state.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Text buffer for the query.
    buffer: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl InputState {
    /// Create an empty search box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the search box.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key press and return the events it produces.
    pub fn handle_key(&mut self, key: KeyInput, app: &App) -> Vec<AppEvent> {
        if app.detail_visible() {
            self.handle_panel_key(key)
        } else {
            self.handle_search_key(key, app)
        }
    }

    /// Keys while the detail panel is open act on the selected place.
    fn handle_panel_key(&mut self, key: KeyInput) -> Vec<AppEvent> {
        match key {
            KeyInput::Char('d') => vec![AppEvent::DirectionsRequested],
            KeyInput::Char('o') => vec![AppEvent::OpenExternallyRequested],
            KeyInput::Char('w') => {
                vec![AppEvent::TransportChanged { transport: TransportType::Walking }]
            },
            KeyInput::Char('c') => {
                vec![AppEvent::TransportChanged { transport: TransportType::Automobile }]
            },
            KeyInput::Up => vec![AppEvent::SelectPrevious],
            KeyInput::Down | KeyInput::Tab => vec![AppEvent::SelectNext],
            KeyInput::Esc => vec![AppEvent::SelectionCleared],
            KeyInput::Char(_)
            | KeyInput::Enter
            | KeyInput::Backspace
            | KeyInput::Delete
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Home
            | KeyInput::End => vec![],
        }
    }

    /// Keys while the panel is closed edit and submit the query.
    fn handle_search_key(&mut self, key: KeyInput, app: &App) -> Vec<AppEvent> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                vec![AppEvent::Redraw]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppEvent::Redraw]
            },
            KeyInput::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppEvent::Redraw]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppEvent::Redraw]
            },
            KeyInput::Right => {
                if self.cursor < self.char_len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                vec![AppEvent::Redraw]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppEvent::Redraw]
            },
            KeyInput::End => {
                self.cursor = self.char_len();
                vec![AppEvent::Redraw]
            },
            KeyInput::Enter => vec![AppEvent::QuerySubmitted { query: self.buffer.clone() }],
            KeyInput::Up => vec![AppEvent::SelectPrevious],
            KeyInput::Down | KeyInput::Tab => vec![AppEvent::SelectNext],
            KeyInput::Esc => {
                if app.route().overlay_active() || app.route().is_computing() {
                    vec![AppEvent::RouteDismissed]
                } else {
                    vec![AppEvent::QuitRequested]
                }
            },
        }
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer.char_indices().nth(char_index).map_or(self.buffer.len(), |(i, _)| i)
    }
}
