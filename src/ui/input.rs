use crate::event::events::Event;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Fallback bindings that apply when the view did not consume the key.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Event::Quit),
            _ => None,
        }
    }
}
