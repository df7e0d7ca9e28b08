use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FormField, Mode};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => cancel_form(app),
        (_, KeyCode::Enter) => submit_form(app),
        _ => edit_form(app, key),
    }
}

fn edit_form(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.form else {
        return;
    };

    // Focus movement
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Tab) | (_, KeyCode::Down) => {
            form.focus = form.focus.next();
            return;
        }
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => {
            form.focus = form.focus.prev();
            return;
        }
        _ => {}
    }

    // The priority row is a selector, not a text field
    if form.focus == FormField::Priority {
        match (key.modifiers, key.code) {
            (_, KeyCode::Left) => form.priority = form.priority.prev(),
            (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                form.priority = form.priority.next();
            }
            _ => {}
        }
        return;
    }

    let Some(field) = form.focused_field_mut() else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Backspace) => field.backspace(),
        (_, KeyCode::Delete) => field.delete(),
        (_, KeyCode::Left) => field.left(),
        (_, KeyCode::Right) => field.right(),
        (_, KeyCode::Home) => field.home(),
        (_, KeyCode::End) => field.end(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => field.insert(c),
        _ => {}
    }
}

fn submit_form(app: &mut App) {
    let Some(form) = &app.form else {
        return;
    };
    let editing = form.task_id.clone();
    let draft = match form.draft() {
        Ok(draft) => draft,
        Err(message) => {
            if let Some(form) = &mut app.form {
                form.error = Some(message);
            }
            return;
        }
    };

    let outcome = match &editing {
        Some(id) => app.store.update_task(id, draft).map(|_| "Task updated"),
        None => app.store.add_task(draft).map(|_| "Task added"),
    };
    match outcome {
        Ok(message) => {
            app.form = None;
            app.mode = Mode::Navigate;
            app.set_status(message);
            app.clamp_cursor();
        }
        Err(e) => app.set_error(format!("Save failed: {e}")),
    }
}

fn cancel_form(app: &mut App) {
    app.form = None;
    app.store.editing_id = None;
    app.mode = Mode::Navigate;
}
