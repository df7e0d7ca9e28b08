use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::StatusFilter;
use crate::tui::app::{App, Mode};

/// Render the search row and the status tabs with their count badges
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_search_row(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
}

fn render_search_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        " / ",
        Style::default().fg(app.theme.accent).bg(bg),
    )];

    if app.store.search_term.is_empty() && app.mode != Mode::Search {
        spans.push(Span::styled(
            "Search tasks...",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            app.store.search_term.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }
    if app.mode == Mode::Search {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.accent).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let counts = app.store.counts();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    let tabs = [
        (StatusFilter::All, counts.all),
        (StatusFilter::Pending, counts.pending),
        (StatusFilter::Completed, counts.completed),
    ];
    for (i, (filter, count)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(sep.clone());
        }
        let is_current = app.store.filter == *filter;
        let (label_style, count_style) = if is_current {
            let style = Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD);
            (style, style)
        } else {
            (
                Style::default().fg(app.theme.text).bg(bg),
                Style::default().fg(app.theme.dim).bg(bg),
            )
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), label_style));
        spans.push(Span::styled(format!("{count} "), count_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
