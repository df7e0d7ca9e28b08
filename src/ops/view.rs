use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::Task;

/// Status tab shown in the filter bar. Applied after the search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    /// Tab label as shown in the filter bar
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Completed => "Completed",
        }
    }

    /// Next tab in display order, wrapping around
    pub fn next(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

/// Per-status counts for the filter-tab badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Stats shown above the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStats {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
}

// ---------------------------------------------------------------------------
// Search and status filters
// ---------------------------------------------------------------------------

/// Case-insensitive substring match of `term` against title, description,
/// and category. Absent optional fields are treated as empty. An empty term
/// matches every task.
pub fn search_matches(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let field_matches =
        |field: Option<&str>| field.is_some_and(|s| s.to_lowercase().contains(&needle));
    task.title.to_lowercase().contains(&needle)
        || field_matches(task.description.as_deref())
        || field_matches(task.category.as_deref())
}

fn status_matches(task: &Task, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Pending => !task.completed,
        StatusFilter::Completed => task.completed,
    }
}

/// The visible subset: search filter first, then status filter. Storage
/// order is preserved; display sorting is a separate step.
pub fn visible_tasks<'a>(tasks: &'a [Task], term: &str, filter: StatusFilter) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| search_matches(t, term))
        .filter(|t| status_matches(t, filter))
        .collect()
}

/// Badge counts, computed over the search-filtered set only. The active
/// status tab deliberately does not change these.
pub fn task_counts(tasks: &[Task], term: &str) -> TaskCounts {
    let mut counts = TaskCounts {
        all: 0,
        completed: 0,
        pending: 0,
    };
    for task in tasks.iter().filter(|t| search_matches(t, term)) {
        counts.all += 1;
        if task.completed {
            counts.completed += 1;
        } else {
            counts.pending += 1;
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Display sort
// ---------------------------------------------------------------------------

/// Comparator for the on-screen ordering. Key precedence: incomplete before
/// completed, then higher priority first, then earlier due date first (a due
/// date sorts before none), then most recently created first.
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Stable sort of the visible set into display order
pub fn sort_for_display(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| display_order(a, b));
}

// ---------------------------------------------------------------------------
// Overdue and stats
// ---------------------------------------------------------------------------

/// A task is overdue when its due date is strictly before `today` and it is
/// not completed. Recomputed on every render, never stored.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < today)
}

/// Stats over the visible set (not the full list)
pub fn list_stats(visible: &[&Task], today: NaiveDate) -> ListStats {
    ListStats {
        total: visible.len(),
        completed: visible.iter().filter(|t| t.completed).count(),
        overdue: visible.iter().filter(|t| is_overdue(t, today)).count(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
