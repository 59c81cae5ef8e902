//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, PollStatus};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.poll_status {
        PollStatus::Live => Color::Green,
        PollStatus::Loading => Color::Yellow,
        PollStatus::Stale => Color::Yellow,
        PollStatus::Failed => Color::Red,
    };

    let updated = match app.last_update {
        Some(at) => format!(
            " {} {}s ",
            app.catalog.get("updated"),
            at.elapsed().as_secs()
        ),
        None => format!(" {} {} ", app.catalog.get("updated"), app.catalog.get("never")),
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let tab_info = format!(" {}/{} ", app.active_tab + 1, app.tabs.len());

    let spans = vec![
        Span::styled(
            format!(" {} ", app.poll_status.label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        Span::styled(format!(" {} ", app.currency), Style::default().fg(Color::Cyan)),
        Span::raw("│"),
        Span::raw(updated),
        Span::raw("│"),
        error_span,
        Span::raw(format!(
            "{:>width$}",
            tab_info,
            width = area.width.saturating_sub(40) as usize
        )),
    ];

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
