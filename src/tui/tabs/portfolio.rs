//! Portfolio tab: holdings table, valuation total, quantity editor.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::locale::format_currency;
use crate::tui::app::{App, Mode};
use crate::tui::components::{status_bar, tab_bar};

/// Renders the portfolio tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let editing = app.mode == Mode::Insert;
    let mut constraints = vec![
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Status bar
        Constraint::Length(1), // Column header
        Constraint::Min(3),    // Holdings table
        Constraint::Length(1), // Total
    ];
    if editing {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1)); // Keybindings help

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    tab_bar::render(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);
    render_header(frame, layout[2], app);
    render_table(frame, layout[3], app);
    render_total(frame, layout[4], app);
    if editing {
        render_editor(frame, layout[5], app);
    }
    render_keybindings(frame, layout[if editing { 6 } else { 5 }], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = format!(
        "    {:<8}{:>14}{:>18}{:>18}",
        app.catalog.get("ticker"),
        app.catalog.get("quantity"),
        app.catalog.get("price"),
        app.catalog.get("value"),
    );
    let para = Paragraph::new(header).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(para, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let tickers = app.portfolio_tickers();

    let mut lines: Vec<Line> = Vec::with_capacity(tickers.len());
    for (i, ticker) in tickers.iter().enumerate() {
        let quantity = app.store.holding(ticker);
        let price = app.snapshot.as_ref().and_then(|s| s.get(ticker));

        let quantity_text = quantity
            .map(|q| q.normalize().to_string())
            .unwrap_or_else(|| "–".to_string());
        let price_text = price
            .map(|p| format_currency(p, &app.currency))
            .unwrap_or_else(|| "–".to_string());
        let value_text = match (quantity, price) {
            (Some(q), Some(p)) => format_currency(q * p, &app.currency),
            (Some(_), None) => format_currency(rust_decimal::Decimal::ZERO, &app.currency),
            _ => String::new(),
        };

        let held = quantity.is_some();
        let name_style = if held {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut line = Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{ticker:<8}"), name_style),
            Span::raw(format!("{quantity_text:>14}")),
            Span::raw(format!("{price_text:>18}")),
            Span::styled(format!("{value_text:>18}"), Style::default().fg(Color::Cyan)),
        ]);
        if i == app.portfolio_selected {
            line = line.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        lines.push(line);
    }

    let visible = area.height as usize;
    let scroll = app
        .portfolio_selected
        .saturating_sub(visible.saturating_sub(1)) as u16;

    let para = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(para, area);
}

fn render_total(frame: &mut Frame, area: Rect, app: &App) {
    let valuation = app.valuation();
    let line = Line::from(vec![
        Span::styled(
            format!("    {}: ", app.catalog.get("total")),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format_currency(valuation.total, &app.currency),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the quantity input box and places the hardware cursor in it.
fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    let ticker = app.editing_ticker.as_deref().unwrap_or("?");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} — {} ", app.catalog.get("quantity"), ticker))
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let para = Paragraph::new(app.quantity_input.as_str());
    frame.render_widget(para, inner);
    frame.set_cursor_position((inner.x + app.quantity_input.cursor as u16, inner.y));
}

fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.mode {
        Mode::Insert => " enter save · esc cancel",
        Mode::Normal => " q quit · tab switch · j/k move · e edit · d clear",
    };
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
