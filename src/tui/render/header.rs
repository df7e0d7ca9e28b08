use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::display_width;

/// Render the header row (app name + greeting) with a separator below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            "TaskFlow",
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(user) = app.store.user() {
        let greeting = format!("Welcome back, {} ", user.username);
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let greeting_width = display_width(&greeting);
        if used + greeting_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - greeting_width),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(
                greeting,
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let title = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(title, chunks[0]);

    let separator = Paragraph::new("\u{2500}".repeat(width))
        .style(Style::default().fg(app.theme.dim).bg(bg));
    frame.render_widget(separator, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::{TERM_W, app_logged_in, render_to_string};

    #[test]
    fn test_header_shows_app_name_and_greeting() {
        let (app, _dir) = app_logged_in();
        let out = render_to_string(TERM_W, 2, |frame, area| {
            super::render_header(frame, &app, area);
        });
        assert!(out.contains("TaskFlow"));
        assert!(out.contains("Welcome back, alice"));
    }
}
