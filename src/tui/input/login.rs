use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, LOGIN_DELAY, PendingLogin};

pub(super) fn handle_login(app: &mut App, key: KeyEvent) {
    // A submitted login cannot be cancelled; keys are dropped until it lands
    if app.pending_login.is_some() {
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => submit_login(app),
        (_, KeyCode::Esc) => app.should_quit = true,
        (_, KeyCode::Backspace) => app.username_input.backspace(),
        (_, KeyCode::Delete) => app.username_input.delete(),
        (_, KeyCode::Left) => app.username_input.left(),
        (_, KeyCode::Right) => app.username_input.right(),
        (_, KeyCode::Home) => app.username_input.home(),
        (_, KeyCode::End) => app.username_input.end(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.username_input.insert(c);
        }
        _ => {}
    }
}

fn submit_login(app: &mut App) {
    let username = app.username_input.value.trim().to_string();
    if username.is_empty() {
        return;
    }
    app.pending_login = Some(PendingLogin {
        username,
        deadline: Instant::now() + LOGIN_DELAY,
    });
}
