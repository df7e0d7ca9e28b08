use chrono::Utc;
use tracing::info;

use crate::io::storage::{Storage, StorageError, generate_id};
use crate::model::{Task, TaskDraft, User};
use crate::ops::{self, StatusFilter, TaskCounts};

/// Session state container. Owns the canonical task list plus the active
/// search and filter settings, and persists through [`Storage`] after every
/// mutation. Views derive from it on demand; nothing derived is stored.
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
    user: Option<User>,
    dark_mode: bool,
    /// Active status tab
    pub filter: StatusFilter,
    /// Live search input, applied before the status tab
    pub search_term: String,
    /// Id of the task currently open in the edit form, if any
    pub editing_id: Option<String>,
}

impl TaskStore {
    /// Load persisted state. Absent keys yield an empty list, no user, and
    /// light mode; corrupt values surface as errors.
    pub fn load(storage: Storage) -> Result<TaskStore, StorageError> {
        let tasks = storage.load_tasks()?;
        let user = storage.load_user()?;
        let dark_mode = storage.load_dark_mode();
        info!(count = tasks.len(), "loaded task list");
        Ok(TaskStore {
            storage,
            tasks,
            user,
            dark_mode,
            filter: StatusFilter::default(),
            search_term: String::new(),
            editing_id: None,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Visible subset in display order: search filter, status filter, then
    /// the stable multi-key sort.
    pub fn visible(&self) -> Vec<&Task> {
        let mut visible = ops::visible_tasks(&self.tasks, &self.search_term, self.filter);
        ops::sort_for_display(&mut visible);
        visible
    }

    /// Badge counts over the search-filtered set (tab-independent)
    pub fn counts(&self) -> TaskCounts {
        ops::task_counts(&self.tasks, &self.search_term)
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Record `username` as the current user. No credential check happens;
    /// callers validate non-emptiness at the input layer.
    pub fn login(&mut self, username: &str) -> Result<(), StorageError> {
        let user = User::new(username.trim().to_string(), Utc::now());
        self.storage.save_user(&user)?;
        info!(username = %user.username, "logged in");
        self.user = Some(user);
        Ok(())
    }

    /// Clear the current user. The task list is left untouched.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.clear_user()?;
        info!("logged out");
        self.user = None;
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool, StorageError> {
        self.dark_mode = !self.dark_mode;
        self.storage.save_dark_mode(self.dark_mode)?;
        Ok(self.dark_mode)
    }

    // -----------------------------------------------------------------------
    // Task mutations
    // -----------------------------------------------------------------------

    /// Create a task from `draft` and prepend it to the list
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<&Task, StorageError> {
        let task = Task::new(generate_id(), draft, Utc::now());
        self.tasks.insert(0, task);
        self.persist_tasks()?;
        info!(id = %self.tasks[0].id, count = self.tasks.len(), "task added");
        Ok(&self.tasks[0])
    }

    /// Replace the editable fields of the task with `id`. Position in the
    /// list, completion flag, and creation timestamp are preserved. An
    /// unknown id is a no-op. Clears the editing marker on success.
    pub fn update_task(&mut self, id: &str, draft: TaskDraft) -> Result<bool, StorageError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.apply_draft(draft, Utc::now());
        self.editing_id = None;
        self.persist_tasks()?;
        info!(id, "task updated");
        Ok(true)
    }

    /// Remove the task with `id`. An unknown id is a no-op.
    pub fn delete_task(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.persist_tasks()?;
        info!(id, count = self.tasks.len(), "task deleted");
        Ok(true)
    }

    /// Flip the completion flag of the task with `id` and refresh its
    /// modification timestamp. An unknown id is a no-op.
    pub fn toggle_task(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        task.updated_at = Utc::now();
        self.persist_tasks()?;
        Ok(true)
    }

    /// Post-mutation hook: the whole list is rewritten after every change
    fn persist_tasks(&mut self) -> Result<(), StorageError> {
        self.storage.save_tasks(&self.tasks)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
