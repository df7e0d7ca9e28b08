use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority level. Ordering follows urgency: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Lowercase label as shown on task badges
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Capitalized name as shown in the form selector
    pub fn display_name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Next level up, wrapping High -> Low (form selector cycling)
    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    /// Next level down, wrapping Low -> High
    pub fn prev(self) -> Priority {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique identifier
    pub id: String,
    /// Title text; never empty for a persisted task
    pub title: String,
    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority level
    pub priority: Priority,
    /// Optional due date (calendar date, no time component)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Optional free-text category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a task from form fields with a fresh identifier. Created and
    /// updated timestamps start equal; the task starts incomplete.
    pub fn new(id: String, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            due_date: draft.due_date,
            category: draft.category,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields from a form submission. Identifier,
    /// completion flag, and creation timestamp are preserved.
    pub fn apply_draft(&mut self, draft: TaskDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.description = draft.description;
        self.priority = draft.priority;
        self.due_date = draft.due_date;
        self.category = draft.category;
        self.updated_at = now;
    }
}

/// Field values collected by the task form, before an identifier and
/// timestamps are assigned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl TaskDraft {
    /// Build a draft from raw form input: title/description/category are
    /// trimmed, and empty optional fields become absent.
    pub fn from_input(
        title: &str,
        description: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
        category: &str,
    ) -> Self {
        TaskDraft {
            title: title.trim().to_string(),
            description: non_empty(description),
            priority,
            due_date,
            category: non_empty(category),
        }
    }

    /// A draft can be submitted only when the trimmed title is non-empty
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty()
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
