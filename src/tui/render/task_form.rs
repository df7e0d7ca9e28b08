use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Priority;
use crate::tui::app::{App, FormField, FormState, TextField};
use crate::tui::theme::Theme;

use super::centered_rect;

/// Render the add/edit form as a centered overlay
pub fn render_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = match &app.form {
        Some(form) => form,
        None => return,
    };
    let theme = &app.theme;

    let popup = centered_rect(60, 80, area);
    frame.render_widget(Clear, popup);

    let heading = if form.task_id.is_some() {
        " Edit Task"
    } else {
        " Add New Task"
    };
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        heading,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))];

    push_field(
        &mut lines,
        theme,
        "Title",
        &form.title,
        "Task title...",
        form.focus == FormField::Title,
    );
    push_field(
        &mut lines,
        theme,
        "Description",
        &form.description,
        "Task description (optional)...",
        form.focus == FormField::Description,
    );
    push_priority_selector(&mut lines, theme, form);
    push_field(
        &mut lines,
        theme,
        "Due Date",
        &form.due_date,
        "YYYY-MM-DD",
        form.focus == FormField::DueDate,
    );
    push_field(
        &mut lines,
        theme,
        "Category",
        &form.category,
        "e.g. Work, Personal",
        form.focus == FormField::Category,
    );

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("   {error}"),
            Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .style(Style::default().bg(theme.background));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, popup);
}

fn label_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    }
}

/// Push a blank spacer, a label row, and a value row for one text field
fn push_field<'a>(
    lines: &mut Vec<Line<'a>>,
    theme: &Theme,
    label: &'a str,
    field: &TextField,
    placeholder: &'a str,
    focused: bool,
) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("   {label}"),
        label_style(theme, focused),
    )));

    let mut spans: Vec<Span> = vec![Span::raw("   ")];
    if field.value.is_empty() {
        if focused {
            spans.push(Span::styled("\u{258C}", Style::default().fg(theme.accent)));
        }
        spans.push(Span::styled(placeholder, Style::default().fg(theme.dim)));
    } else if focused {
        // Cursor sits on a grapheme boundary, so the split is safe
        let (before, after) = field.value.split_at(field.cursor);
        spans.push(Span::styled(
            before.to_string(),
            Style::default().fg(theme.text_bright),
        ));
        spans.push(Span::styled("\u{258C}", Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            after.to_string(),
            Style::default().fg(theme.text_bright),
        ));
    } else {
        spans.push(Span::styled(
            field.value.clone(),
            Style::default().fg(theme.text),
        ));
    }
    lines.push(Line::from(spans));
}

fn push_priority_selector<'a>(lines: &mut Vec<Line<'a>>, theme: &Theme, form: &FormState) {
    let focused = form.focus == FormField::Priority;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "   Priority",
        label_style(theme, focused),
    )));

    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    for priority in [Priority::Low, Priority::Medium, Priority::High] {
        let selected = form.priority == priority;
        let style = if selected {
            Style::default()
                .fg(theme.priority_color(priority))
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(format!(" {} ", priority.display_name()), style));
        spans.push(Span::raw(" "));
    }
    if focused {
        spans.push(Span::styled(
            "\u{2190} \u{2192}",
            Style::default().fg(theme.dim),
        ));
    }
    lines.push(Line::from(spans));
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::{TERM_H, TERM_W, app_logged_in, render_to_string};
    use crate::tui::app::{FormState, Mode};

    #[test]
    fn test_blank_form_shows_placeholders() {
        let (mut app, _dir) = app_logged_in();
        app.form = Some(FormState::blank());
        app.mode = Mode::Form;

        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_task_form(frame, &app, area);
        });
        assert!(out.contains("Add New Task"));
        assert!(out.contains("Task title..."));
        assert!(out.contains("Task description (optional)..."));
        assert!(out.contains("YYYY-MM-DD"));
        assert!(out.contains("e.g. Work, Personal"));
        assert!(out.contains("Low"));
        assert!(out.contains("Medium"));
        assert!(out.contains("High"));
    }

    #[test]
    fn test_edit_form_shows_task_values() {
        let (mut app, _dir) = app_logged_in();
        app.store
            .add_task(crate::model::TaskDraft {
                title: "Fix the roof".to_string(),
                category: Some("Home".to_string()),
                ..crate::model::TaskDraft::default()
            })
            .unwrap();
        let task = &app.store.tasks()[0];
        app.form = Some(FormState::for_task(task));
        app.mode = Mode::Form;

        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_task_form(frame, &app, area);
        });
        assert!(out.contains("Edit Task"));
        assert!(out.contains("Fix the roof"));
        assert!(out.contains("Home"));
    }

    #[test]
    fn test_validation_error_is_shown() {
        let (mut app, _dir) = app_logged_in();
        let mut form = FormState::blank();
        form.error = Some("Title is required".to_string());
        app.form = Some(form);
        app.mode = Mode::Form;

        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_task_form(frame, &app, area);
        });
        assert!(out.contains("Title is required"));
    }
}
