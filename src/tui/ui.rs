//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::{App, Tab};
use super::tabs::{portfolio, rates};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_tab() {
        Tab::Rates => rates::render(frame, app),
        Tab::Portfolio => portfolio::render(frame, app),
    }

    if let Some(ticker) = &app.detail {
        rates::render_detail(frame, app, ticker);
    }
}
