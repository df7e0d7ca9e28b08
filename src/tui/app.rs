use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::io::config_io::load_config;
use crate::io::lock::DirLock;
use crate::io::storage::{Storage, resolve_data_dir};
use crate::model::{AppConfig, Priority, Task, TaskDraft};
use crate::store::TaskStore;
use crate::util::{next_grapheme_boundary, prev_grapheme_boundary};

use super::input;
use super::render;
use super::theme::Theme;

/// Synthetic delay between submitting the login form and the session
/// starting. Input is ignored while it runs and it cannot be cancelled.
pub const LOGIN_DELAY: Duration = Duration::from_millis(300);

const LOG_FILE: &str = "taskflow.log";

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Tasks,
}

/// Current interaction mode within the tasks screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    Form,
    Confirm,
}

/// Single-line text input with a byte-offset cursor. The cursor always
/// sits on a grapheme boundary.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn with_value(value: &str) -> Self {
        TextField {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
            self.value.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
            self.value.drain(self.cursor..next);
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Form field focus order, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    DueDate,
    Category,
}

impl FormField {
    pub fn next(self) -> FormField {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority => FormField::DueDate,
            FormField::DueDate => FormField::Category,
            FormField::Category => FormField::Title,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Title => FormField::Category,
            FormField::Description => FormField::Title,
            FormField::Priority => FormField::Description,
            FormField::DueDate => FormField::Priority,
            FormField::Category => FormField::DueDate,
        }
    }
}

/// State of the add/edit form overlay
#[derive(Debug, Clone)]
pub struct FormState {
    /// None while creating, the task id while editing
    pub task_id: Option<String>,
    pub focus: FormField,
    pub title: TextField,
    pub description: TextField,
    pub priority: Priority,
    pub due_date: TextField,
    pub category: TextField,
    /// Validation message shown inside the overlay
    pub error: Option<String>,
}

impl FormState {
    pub fn blank() -> Self {
        FormState {
            task_id: None,
            focus: FormField::Title,
            title: TextField::default(),
            description: TextField::default(),
            priority: Priority::default(),
            due_date: TextField::default(),
            category: TextField::default(),
            error: None,
        }
    }

    pub fn for_task(task: &Task) -> Self {
        let due_text = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        FormState {
            task_id: Some(task.id.clone()),
            focus: FormField::Title,
            title: TextField::with_value(&task.title),
            description: TextField::with_value(task.description.as_deref().unwrap_or_default()),
            priority: task.priority,
            due_date: TextField::with_value(&due_text),
            category: TextField::with_value(task.category.as_deref().unwrap_or_default()),
            error: None,
        }
    }

    /// The text field under focus, or None on the priority selector
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Priority => None,
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Category => Some(&mut self.category),
        }
    }

    /// Validate the form into a draft. Empty titles and malformed due
    /// dates are rejected here; the model itself never checks.
    pub fn draft(&self) -> Result<TaskDraft, String> {
        if self.title.value.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        let due_text = self.due_date.value.trim();
        let due_date = if due_text.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due_text, "%Y-%m-%d")
                    .map_err(|_| "Due date must be YYYY-MM-DD".to_string())?,
            )
        };
        Ok(TaskDraft::from_input(
            &self.title.value,
            &self.description.value,
            self.priority,
            due_date,
            &self.category.value,
        ))
    }
}

/// Login submitted, waiting out the delay
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub username: String,
    pub deadline: Instant,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub config: AppConfig,
    pub view: View,
    pub mode: Mode,
    pub theme: Theme,
    pub should_quit: bool,
    /// Cursor index into the visible task list
    pub cursor: usize,
    /// First display line shown in the list area
    pub scroll_offset: usize,
    pub username_input: TextField,
    pub pending_login: Option<PendingLogin>,
    pub form: Option<FormState>,
    /// Task id awaiting delete confirmation
    pub pending_delete: Option<String>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(store: TaskStore, config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.colors, store.dark_mode());
        let view = if store.user().is_some() {
            View::Tasks
        } else {
            View::Login
        };

        App {
            store,
            config,
            view,
            mode: Mode::Navigate,
            theme,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            username_input: TextField::default(),
            pending_login: None,
            form: None,
            pending_delete: None,
            show_help: false,
            status_message: None,
            status_is_error: false,
        }
    }

    /// Id of the task under the cursor in the visible (sorted) list
    pub fn selected_task_id(&self) -> Option<String> {
        self.store.visible().get(self.cursor).map(|t| t.id.clone())
    }

    /// Keep the cursor inside the visible list after it shrinks
    pub fn clamp_cursor(&mut self) {
        let len = self.store.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    /// Rebuild the palette after a dark/light toggle
    pub fn refresh_theme(&mut self) {
        self.theme = Theme::from_config(&self.config.colors, self.store.dark_mode());
    }

    /// Drive time-based state. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        let due = self
            .pending_login
            .as_ref()
            .is_some_and(|p| Instant::now() >= p.deadline);
        if !due {
            return;
        }
        if let Some(pending) = self.pending_login.take() {
            match self.store.login(&pending.username) {
                Ok(()) => {
                    self.view = View::Tasks;
                    self.mode = Mode::Navigate;
                    self.cursor = 0;
                    self.username_input.clear();
                }
                Err(e) => self.set_error(format!("Login failed: {e}")),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the TUI application
pub fn run(data_dir_flag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(data_dir_flag)?;
    fs::create_dir_all(&data_dir)?;
    init_tracing(&data_dir);
    info!(dir = %data_dir.display(), "starting");

    let _lock = DirLock::acquire_default(&data_dir)?;
    let config = load_config(&data_dir)?;
    let storage = Storage::open(&data_dir)?;
    let store = TaskStore::load(storage)?;
    let mut app = App::new(store, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a file in the data directory. Stdout belongs to the terminal UI,
/// so a missing or unwritable log file only means no logs.
fn init_tracing(data_dir: &Path) {
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
    else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // Short poll so a pending login resolves close to its deadline
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
        app.tick();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
