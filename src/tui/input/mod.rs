mod confirm;
mod form;
mod login;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, View};

use confirm::*;
use form::*;
use login::*;
use navigate::*;
use search::*;

/// Handle a key event in the current view and mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);

    // Ctrl+Q quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.should_quit = true;
        return;
    }

    // Status messages live until the next key press
    app.status_message = None;
    app.status_is_error = false;

    // Help overlay intercepts all input
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.view {
        View::Login => handle_login(app, key),
        View::Tasks => match app.mode {
            Mode::Navigate => handle_navigate(app, key),
            Mode::Search => handle_search(app, key),
            Mode::Form => handle_form(app, key),
            Mode::Confirm => handle_confirm(app, key),
        },
    }
}

/// Normalize key events from terminals using the kitty keyboard protocol.
///
/// Kitty protocol sends `Char(lowercase) + SHIFT` instead of
/// `Char(UPPERCASE) + SHIFT`, and `Char(base_symbol) + SHIFT` instead of
/// `Char(shifted_symbol)`.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Map a base key to its US-layout shifted symbol. Returns None if the key
/// is not a shiftable symbol (or is already shifted).
fn shift_symbol(c: char) -> Option<char> {
    match c {
        '`' => Some('~'),
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '4' => Some('$'),
        '5' => Some('%'),
        '6' => Some('^'),
        '7' => Some('&'),
        '8' => Some('*'),
        '9' => Some('('),
        '0' => Some(')'),
        '-' => Some('_'),
        '=' => Some('+'),
        '[' => Some('{'),
        ']' => Some('}'),
        '\\' => Some('|'),
        ';' => Some(':'),
        '\'' => Some('"'),
        ',' => Some('<'),
        '.' => Some('>'),
        '/' => Some('?'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::Storage;
    use crate::model::{AppConfig, TaskDraft};
    use crate::ops::StatusFilter;
    use crate::store::TaskStore;
    use crate::tui::app::FormField;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn logged_in_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let mut store = TaskStore::load(storage).unwrap();
        store.login("alice").unwrap();
        let app = App::new(store, AppConfig::default());
        (app, dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn press_shift(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::SHIFT));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_task(app: &mut App, title: &str) {
        app.store
            .add_task(TaskDraft {
                title: title.to_string(),
                ..TaskDraft::default()
            })
            .unwrap();
    }

    // --- Key normalization ---

    #[test]
    fn test_normalize_kitty_shifted_letter() {
        let key = normalize_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::SHIFT));
        assert_eq!(key.code, KeyCode::Char('G'));
        assert!(key.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn test_normalize_kitty_shifted_symbol() {
        let key = normalize_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::SHIFT));
        assert_eq!(key.code, KeyCode::Char('?'));
        assert!(!key.modifiers.contains(KeyModifiers::SHIFT));
    }

    // --- Login flow ---

    #[test]
    fn test_login_types_name_and_submits() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let store = TaskStore::load(storage).unwrap();
        let mut app = App::new(store, AppConfig::default());
        assert_eq!(app.view, View::Login);

        type_str(&mut app, "alice");
        assert_eq!(app.username_input.value, "alice");

        press(&mut app, KeyCode::Enter);
        assert!(app.pending_login.is_some());

        // Typing during the delay is ignored
        type_str(&mut app, "xyz");
        assert_eq!(app.username_input.value, "alice");
    }

    #[test]
    fn test_login_rejects_blank_username() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let store = TaskStore::load(storage).unwrap();
        let mut app = App::new(store, AppConfig::default());

        press(&mut app, KeyCode::Enter);
        assert!(app.pending_login.is_none());

        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.pending_login.is_none());
    }

    // --- Navigation ---

    #[test]
    fn test_cursor_moves_and_clamps() {
        let (mut app, _dir) = logged_in_app();
        add_task(&mut app, "One");
        add_task(&mut app, "Two");
        add_task(&mut app, "Three");

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 2); // clamped at the bottom

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
        press_shift(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_tab_cycles_status_filter() {
        let (mut app, _dir) = logged_in_app();
        assert_eq!(app.store.filter, StatusFilter::All);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.store.filter, StatusFilter::Pending);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.store.filter, StatusFilter::Completed);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.store.filter, StatusFilter::All);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.store.filter, StatusFilter::Pending);
    }

    #[test]
    fn test_space_toggles_selected_task() {
        let (mut app, _dir) = logged_in_app();
        add_task(&mut app, "Flip me");

        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[0].completed);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.store.tasks()[0].completed);
    }

    #[test]
    fn test_delete_asks_then_deletes() {
        let (mut app, _dir) = logged_in_app();
        add_task(&mut app, "Victim");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.pending_delete.is_some());

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_delete_cancel_keeps_task() {
        let (mut app, _dir) = logged_in_app();
        add_task(&mut app, "Survivor");

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.tasks().len(), 1);
    }

    #[test]
    fn test_delete_skips_prompt_when_configured_off() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let mut store = TaskStore::load(storage).unwrap();
        store.login("alice").unwrap();
        let mut config = AppConfig::default();
        config.ui.confirm_delete = false;
        let mut app = App::new(store, config);
        add_task(&mut app, "Gone at once");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_logout_returns_to_login() {
        let (mut app, _dir) = logged_in_app();
        press_shift(&mut app, KeyCode::Char('L'));
        assert_eq!(app.view, View::Login);
        assert!(app.store.user().is_none());
    }

    #[test]
    fn test_dark_mode_toggle_swaps_theme() {
        let (mut app, _dir) = logged_in_app();
        let before = app.theme.background;
        press(&mut app, KeyCode::Char('t'));
        assert!(app.store.dark_mode());
        assert_ne!(app.theme.background, before);
    }

    // --- Search ---

    #[test]
    fn test_search_filters_live_and_enter_keeps_term() {
        let (mut app, _dir) = logged_in_app();
        add_task(&mut app, "Buy milk");
        add_task(&mut app, "Walk dog");

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "buy");
        assert_eq!(app.store.search_term, "buy");
        assert_eq!(app.store.visible().len(), 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.search_term, "buy");
    }

    #[test]
    fn test_search_esc_clears_term() {
        let (mut app, _dir) = logged_in_app();
        add_task(&mut app, "Buy milk");

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zzz");
        assert!(app.store.visible().is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.search_term, "");
        assert_eq!(app.store.visible().len(), 1);
    }

    // --- Form ---

    #[test]
    fn test_add_form_creates_task() {
        let (mut app, _dir) = logged_in_app();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Form);
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Buy milk");
    }

    #[test]
    fn test_form_rejects_empty_title() {
        let (mut app, _dir) = logged_in_app();

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Form);
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Title is required"));
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_form_tab_cycles_fields_and_sets_priority() {
        let (mut app, _dir) = logged_in_app();

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Pay rent");
        press(&mut app, KeyCode::Tab); // description
        press(&mut app, KeyCode::Tab); // priority
        assert_eq!(app.form.as_ref().unwrap().focus, FormField::Priority);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.as_ref().unwrap().priority, crate::model::Priority::High);

        press(&mut app, KeyCode::Tab); // due date
        type_str(&mut app, "2025-06-01");
        press(&mut app, KeyCode::Enter);

        let task = &app.store.tasks()[0];
        assert_eq!(task.priority, crate::model::Priority::High);
        assert_eq!(
            task.due_date,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn test_edit_form_updates_selected_task() {
        let (mut app, _dir) = logged_in_app();
        add_task(&mut app, "Old title");
        let id = app.store.tasks()[0].id.clone();

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Form);
        assert_eq!(app.store.editing_id.as_deref(), Some(id.as_str()));

        // Rewrite the title
        let form = app.form.as_mut().unwrap();
        form.title.clear();
        type_str(&mut app, "New title");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.tasks()[0].title, "New title");
        assert_eq!(app.store.tasks()[0].id, id);
        assert_eq!(app.store.editing_id, None);
    }

    #[test]
    fn test_form_esc_cancels_without_saving() {
        let (mut app, _dir) = logged_in_app();

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Never saved");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.form.is_none());
        assert!(app.store.tasks().is_empty());
    }

    // --- Global ---

    #[test]
    fn test_ctrl_q_quits_from_anywhere() {
        let (mut app, _dir) = logged_in_app();
        press(&mut app, KeyCode::Char('a')); // open the form
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_toggles_and_any_key_closes() {
        let (mut app, _dir) = logged_in_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('j'));
        assert!(!app.show_help);
        assert_eq!(app.cursor, 0); // the key only closed the overlay
    }
}
