use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::display_width;

use super::centered_rect;

/// Render the login screen: a centered card with a username field.
pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(60, 60, area);
    frame.render_widget(Clear, card);

    let bg = app.theme.background;
    let title_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);

    let inner_width = card.width.saturating_sub(2) as usize;
    let center = |text: &str, style: Style| -> Line<'static> {
        let pad = inner_width.saturating_sub(display_width(text)) / 2;
        Line::from(vec![
            Span::styled(" ".repeat(pad), Style::default().bg(bg)),
            Span::styled(text.to_string(), style),
        ])
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));
    lines.push(center("Welcome Back", title_style));
    lines.push(center("Enter your username to access your tasks", dim_style));
    lines.push(Line::from(""));

    // Username field
    let field_width = inner_width.saturating_sub(8).min(40).max(10);
    let pad = inner_width.saturating_sub(field_width) / 2;
    let indent = " ".repeat(pad);
    lines.push(Line::from(vec![
        Span::styled(indent.clone(), Style::default().bg(bg)),
        Span::styled("Username", text_style),
    ]));

    let mut field_spans = vec![Span::styled(indent.clone(), Style::default().bg(bg))];
    if app.username_input.value.is_empty() {
        field_spans.push(Span::styled("Enter your username", dim_style));
    } else {
        field_spans.push(Span::styled(
            app.username_input.value.clone(),
            bright_style,
        ));
    }
    if app.pending_login.is_none() {
        field_spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.accent).bg(bg),
        ));
    }
    lines.push(Line::from(field_spans));
    lines.push(Line::from(vec![
        Span::styled(indent.clone(), Style::default().bg(bg)),
        Span::styled("\u{2500}".repeat(field_width), dim_style),
    ]));
    lines.push(Line::from(""));

    // Submit state
    if app.pending_login.is_some() {
        lines.push(center("Signing in...", dim_style));
    } else {
        lines.push(center("Sign In", title_style));
        lines.push(center("press Enter", dim_style));
    }
    lines.push(Line::from(""));
    lines.push(center(
        "No account needed - just enter any username to start",
        dim_style,
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(" TaskFlow ", title_style))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, card);
}
