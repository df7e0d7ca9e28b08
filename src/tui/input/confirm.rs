use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let pending = app.pending_delete.take();
            app.mode = Mode::Navigate;
            if let Some(id) = pending {
                delete_task(app, &id);
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.pending_delete = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

pub(super) fn delete_task(app: &mut App, id: &str) {
    match app.store.delete_task(id) {
        Ok(true) => {
            app.set_status("Task deleted");
            app.clamp_cursor();
        }
        Ok(false) => {}
        Err(e) => app.set_error(format!("Delete failed: {e}")),
    }
}
