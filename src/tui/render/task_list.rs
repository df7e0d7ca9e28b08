use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::ops::{self, ListStats};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::{display_width, truncate_to_width};

/// Render the stats row and the scrollable task list
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let today = Local::now().date_naive();
    let visible = app.store.visible();

    if visible.is_empty() {
        let hint = if app.store.tasks().is_empty() {
            "Create your first task to get started"
        } else {
            "Try adjusting your search or filters"
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                " No tasks found",
                Style::default().fg(app.theme.text_bright),
            )),
            Line::from(Span::styled(
                format!(" {hint}"),
                Style::default().fg(app.theme.dim),
            )),
        ];
        let empty = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let stats = ops::list_stats(&visible, today);
    render_stats(frame, &app.theme, &stats, chunks[0]);

    let cursor = app.cursor.min(visible.len() - 1);
    app.cursor = cursor;

    // Build all display lines tagged with their task index
    let mut display_lines: Vec<(Option<usize>, Line)> = Vec::new();
    for (i, task) in visible.iter().enumerate() {
        if i > 0 {
            display_lines.push((None, Line::from("")));
        }
        push_task_lines(
            &mut display_lines,
            &app.theme,
            task,
            i,
            i == cursor,
            today,
            chunks[1].width as usize,
        );
    }

    // Keep the whole cursor item in view
    let list_area = chunks[1];
    let height = list_area.height as usize;
    let first = display_lines
        .iter()
        .position(|(tag, _)| *tag == Some(cursor))
        .unwrap_or(0);
    let last = display_lines
        .iter()
        .rposition(|(tag, _)| *tag == Some(cursor))
        .unwrap_or(first);
    let mut scroll = app.scroll_offset;
    if first < scroll {
        scroll = first;
    } else if height > 0 && last >= scroll + height {
        scroll = (last + 1).saturating_sub(height);
    }
    app.scroll_offset = scroll;

    let lines: Vec<Line> = display_lines
        .into_iter()
        .skip(scroll)
        .take(height)
        .map(|(_, line)| line)
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, list_area);
}

fn render_stats(frame: &mut Frame, theme: &Theme, stats: &ListStats, area: Rect) {
    let bg = theme.background;
    let label = Style::default().fg(theme.dim).bg(bg);
    let count = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let overdue_count = if stats.overdue > 0 {
        Style::default()
            .fg(theme.red)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        count
    };

    let spans = vec![
        Span::styled(" Total ", label),
        Span::styled(stats.total.to_string(), count),
        Span::styled("   Completed ", label),
        Span::styled(stats.completed.to_string(), count),
        Span::styled("   Overdue ", label),
        Span::styled(stats.overdue.to_string(), overdue_count),
    ];
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Push the title line, optional description line, and metadata line for one task
fn push_task_lines<'a>(
    display_lines: &mut Vec<(Option<usize>, Line<'a>)>,
    theme: &Theme,
    task: &'a Task,
    index: usize,
    is_cursor: bool,
    today: chrono::NaiveDate,
    width: usize,
) {
    let bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };

    // Title row: checkbox + title
    let mut spans: Vec<Span> = Vec::new();
    let checkbox = if task.completed { " [x] " } else { " [ ] " };
    let checkbox_style = if task.completed {
        Style::default().fg(theme.green).bg(bg)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };
    spans.push(Span::styled(checkbox, checkbox_style));

    let mut title_style = if task.completed {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if ops::is_overdue(task, today) {
        Style::default().fg(theme.red).bg(bg)
    } else {
        Style::default().fg(theme.text_bright).bg(bg)
    };
    if is_cursor {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    let title_budget = width.saturating_sub(display_width(checkbox));
    spans.push(Span::styled(
        truncate_to_width(&task.title, title_budget),
        title_style,
    ));

    if is_cursor {
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        if content_width < width {
            spans.push(Span::styled(
                " ".repeat(width - content_width),
                Style::default().bg(bg),
            ));
        }
    }
    display_lines.push((Some(index), Line::from(spans)));

    let plain_bg = theme.background;

    // Description row, dimmed
    if let Some(description) = &task.description {
        let desc_spans = vec![
            Span::styled("     ", Style::default().bg(plain_bg)),
            Span::styled(
                description.clone(),
                Style::default().fg(theme.dim).bg(plain_bg),
            ),
        ];
        display_lines.push((Some(index), Line::from(desc_spans)));
    }

    // Metadata row: priority, category, due date, creation time
    let dim = Style::default().fg(theme.dim).bg(plain_bg);
    let mut meta: Vec<Span> = vec![Span::styled("     ", Style::default().bg(plain_bg))];

    let priority_style = if task.completed {
        dim
    } else {
        Style::default()
            .fg(theme.priority_color(task.priority))
            .bg(plain_bg)
    };
    meta.push(Span::styled(task.priority.label(), priority_style));

    if let Some(category) = &task.category {
        meta.push(Span::styled("  ", dim));
        let category_style = if task.completed {
            dim
        } else {
            Style::default().fg(theme.accent).bg(plain_bg)
        };
        meta.push(Span::styled(category.clone(), category_style));
    }

    if let Some(due) = task.due_date {
        meta.push(Span::styled("  ", dim));
        if ops::is_overdue(task, today) {
            meta.push(Span::styled(
                format!("Due {} (Overdue)", due.format("%b %-d, %Y")),
                Style::default().fg(theme.red).bg(plain_bg),
            ));
        } else {
            meta.push(Span::styled(
                format!("Due {}", due.format("%b %-d, %Y")),
                dim,
            ));
        }
    }

    meta.push(Span::styled("  ", dim));
    let created = task.created_at.with_timezone(&Local);
    meta.push(Span::styled(
        format!("Created {}", created.format("%b %-d, %I:%M %p")),
        dim,
    ));
    display_lines.push((Some(index), Line::from(meta)));
}
