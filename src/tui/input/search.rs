use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Search is a live filter: every edit narrows the list immediately.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Keep the term and go back to the list
        (_, KeyCode::Enter) => app.mode = Mode::Navigate,

        // Clear and cancel
        (_, KeyCode::Esc) => {
            app.store.search_term.clear();
            app.cursor = 0;
            app.scroll_offset = 0;
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            app.store.search_term.pop();
            app.cursor = 0;
        }

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.store.search_term.push(c);
            app.cursor = 0;
        }

        _ => {}
    }
}
