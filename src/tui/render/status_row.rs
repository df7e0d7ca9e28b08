use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let line = match app.mode {
        Mode::Navigate => {
            if let Some(ref message) = app.status_message {
                let fg = if app.status_is_error {
                    app.theme.red
                } else {
                    app.theme.green
                };
                let mut spans = vec![Span::styled(
                    format!(" {message}"),
                    Style::default().fg(fg).bg(bg),
                )];
                push_right_hint(&mut spans, "? help", width, dim, bg);
                Line::from(spans)
            } else if app.config.ui.show_key_hints {
                let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
                push_right_hint(
                    &mut spans,
                    "a add  e edit  space toggle  d delete  / search  ? help",
                    width,
                    dim,
                    bg,
                );
                Line::from(spans)
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
        Mode::Search => {
            let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
            push_right_hint(&mut spans, "Enter keep  Esc clear", width, dim, bg);
            Line::from(spans)
        }
        Mode::Form => {
            let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
            push_right_hint(
                &mut spans,
                "Enter save  Esc cancel  Tab next field",
                width,
                dim,
                bg,
            );
            Line::from(spans)
        }
        Mode::Confirm => {
            let mut spans = vec![Span::styled(
                " Are you sure you want to delete this task?",
                Style::default()
                    .fg(app.theme.yellow)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )];
            push_right_hint(&mut spans, "y delete  n cancel", width, dim, bg);
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-align `hint` after the existing spans, padding with background
fn push_right_hint(
    spans: &mut Vec<Span<'_>>,
    hint: &'static str,
    width: usize,
    dim: Style,
    bg: ratatui::style::Color,
) {
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width + 1 < width {
        let padding = width - content_width - hint_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::{TERM_W, app_logged_in, render_to_string};
    use crate::tui::app::Mode;

    #[test]
    fn test_navigate_shows_key_hints() {
        let (app, _dir) = app_logged_in();
        let out = render_to_string(TERM_W, 1, |frame, area| {
            super::render_status_row(frame, &app, area);
        });
        assert!(out.contains("a add"));
        assert!(out.contains("? help"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let (mut app, _dir) = app_logged_in();
        app.set_status("Task added");
        let out = render_to_string(TERM_W, 1, |frame, area| {
            super::render_status_row(frame, &app, area);
        });
        assert!(out.contains("Task added"));
        assert!(!out.contains("a add  e edit"));
    }

    #[test]
    fn test_confirm_mode_shows_prompt() {
        let (mut app, _dir) = app_logged_in();
        app.mode = Mode::Confirm;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            super::render_status_row(frame, &app, area);
        });
        assert!(out.contains("Are you sure you want to delete this task?"));
        assert!(out.contains("y delete"));
    }

    #[test]
    fn test_form_mode_shows_form_hints() {
        let (mut app, _dir) = app_logged_in();
        app.mode = Mode::Form;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            super::render_status_row(frame, &app, area);
        });
        assert!(out.contains("Enter save"));
        assert!(out.contains("Tab next field"));
    }
}
