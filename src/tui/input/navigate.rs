use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::StatusFilter;
use crate::tui::app::{App, FormState, Mode, View};

use super::confirm::delete_task;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Char('j')) | (_, KeyCode::Down) => move_cursor(app, 1),
        (KeyModifiers::NONE, KeyCode::Char('k')) | (_, KeyCode::Up) => move_cursor(app, -1),
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => jump_bottom(app),

        // Status tabs
        (KeyModifiers::NONE, KeyCode::Tab) => {
            let next = app.store.filter.next();
            set_filter(app, next);
        }
        (KeyModifiers::NONE, KeyCode::Char('1')) => set_filter(app, StatusFilter::All),
        (KeyModifiers::NONE, KeyCode::Char('2')) => set_filter(app, StatusFilter::Pending),
        (KeyModifiers::NONE, KeyCode::Char('3')) => set_filter(app, StatusFilter::Completed),

        // Task actions
        (KeyModifiers::NONE, KeyCode::Char('a')) => open_add_form(app),
        (KeyModifiers::NONE, KeyCode::Char('e')) | (_, KeyCode::Enter) => open_edit_form(app),
        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Char('x')) => toggle_selected(app),
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => request_delete(app),

        // Search
        (KeyModifiers::NONE, KeyCode::Char('/')) => app.mode = Mode::Search,
        (_, KeyCode::Esc) => clear_search(app),

        // Session and appearance
        (_, KeyCode::Char('L')) => logout(app),
        (KeyModifiers::NONE, KeyCode::Char('t')) => toggle_dark_mode(app),
        (_, KeyCode::Char('?')) => app.show_help = true,

        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: i32) {
    let len = app.store.visible().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    if delta > 0 {
        app.cursor = (app.cursor + 1).min(len - 1);
    } else {
        app.cursor = app.cursor.saturating_sub(1);
    }
}

fn jump_bottom(app: &mut App) {
    let len = app.store.visible().len();
    app.cursor = len.saturating_sub(1);
}

fn set_filter(app: &mut App, filter: StatusFilter) {
    app.store.filter = filter;
    app.cursor = 0;
    app.scroll_offset = 0;
}

fn open_add_form(app: &mut App) {
    app.form = Some(FormState::blank());
    app.mode = Mode::Form;
}

fn open_edit_form(app: &mut App) {
    let Some(id) = app.selected_task_id() else {
        return;
    };
    let Some(task) = app.store.task(&id) else {
        return;
    };
    app.form = Some(FormState::for_task(task));
    app.store.editing_id = Some(id);
    app.mode = Mode::Form;
}

fn toggle_selected(app: &mut App) {
    let Some(id) = app.selected_task_id() else {
        return;
    };
    if let Err(e) = app.store.toggle_task(&id) {
        app.set_error(format!("Save failed: {e}"));
    }
    // Toggling can move the task out of the active tab
    app.clamp_cursor();
}

fn request_delete(app: &mut App) {
    let Some(id) = app.selected_task_id() else {
        return;
    };
    if app.config.ui.confirm_delete {
        app.pending_delete = Some(id);
        app.mode = Mode::Confirm;
    } else {
        delete_task(app, &id);
    }
}

fn clear_search(app: &mut App) {
    if !app.store.search_term.is_empty() {
        app.store.search_term.clear();
        app.cursor = 0;
        app.scroll_offset = 0;
    }
}

fn logout(app: &mut App) {
    match app.store.logout() {
        Ok(()) => {
            app.view = View::Login;
            app.mode = Mode::Navigate;
            app.cursor = 0;
            app.scroll_offset = 0;
            app.store.search_term.clear();
            app.store.filter = StatusFilter::All;
        }
        Err(e) => app.set_error(format!("Logout failed: {e}")),
    }
}

fn toggle_dark_mode(app: &mut App) {
    match app.store.toggle_dark_mode() {
        Ok(_) => app.refresh_theme(),
        Err(e) => app.set_error(format!("Save failed: {e}")),
    }
}
