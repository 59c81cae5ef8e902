//! Rates tab: price grid, top-gainer banner, and the history overlay.

use std::collections::VecDeque;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Sparkline},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::differ::Direction as Movement;
use crate::locale::format_currency;
use crate::tui::app::{App, PollStatus};
use crate::tui::components::{status_bar, tab_bar};

/// Width of the inline trend cell, in points.
const TREND_POINTS: usize = 12;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders the rates tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let has_banner = app.top_gainer.is_some();
    let mut constraints = vec![
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Status bar
    ];
    if has_banner {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(5)); // Price grid
    constraints.push(Constraint::Length(1)); // Keybindings help

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    tab_bar::render(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);

    let mut next = 2;
    if has_banner {
        render_banner(frame, layout[next], app);
        next += 1;
    }
    render_grid(frame, layout[next], app);
    render_keybindings(frame, layout[next + 1], app);
}

/// Renders the top-gainer banner.
fn render_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some(gainer) = &app.top_gainer else {
        return;
    };
    let price = app
        .snapshot
        .as_ref()
        .and_then(|s| s.get(&gainer.ticker))
        .unwrap_or(Decimal::ZERO);

    let line = Line::from(vec![
        Span::styled(
            format!(" ★ {} ", app.catalog.get("top_gainer")),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}/{} ", gainer.ticker, app.currency),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format_currency(price, &app.currency)),
        Span::styled(
            format!("  {} ({})", signed_percent(gainer.percent), signed_amount(gainer.change, &app.currency)),
            Style::default().fg(Color::Green),
        ),
    ]);

    let para = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(para, area);
}

/// Renders the price grid, one row per visible ticker.
fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.catalog.get("title")));

    if app.snapshot.is_none() {
        let text = match app.poll_status {
            PollStatus::Failed => Span::styled(
                app.catalog.get("failed_to_load"),
                Style::default().fg(Color::Red),
            ),
            _ => Span::styled(
                app.catalog.get("loading"),
                Style::default().fg(Color::DarkGray),
            ),
        };
        let para = Paragraph::new(Line::from(text))
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(para, area);
        return;
    }

    let tickers = app.visible_tickers();
    let gainer_ticker = app.top_gainer.as_ref().map(|g| g.ticker.as_str());

    let mut lines: Vec<Line> = Vec::with_capacity(tickers.len());
    for (i, ticker) in tickers.iter().enumerate() {
        let price = app
            .snapshot
            .as_ref()
            .and_then(|s| s.get(ticker))
            .unwrap_or(Decimal::ZERO);
        let star = if app.store.is_favorite(ticker) {
            Span::styled(" ★ ", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("   ")
        };
        let (arrow, arrow_color) = match app.direction.get(ticker) {
            Some(Movement::Up) => ("▲", Color::Green),
            Some(Movement::Down) => ("▼", Color::Red),
            _ => ("·", Color::DarkGray),
        };
        let trend = app
            .history
            .series(ticker)
            .map(|series| trend_cell(series))
            .unwrap_or_default();

        let name_style = if Some(ticker.as_str()) == gainer_ticker {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut line = Line::from(vec![
            star,
            Span::styled(format!("{ticker:<8}"), name_style),
            Span::raw(format!("{:>16}  ", format_currency(price, &app.currency))),
            Span::styled(format!("{arrow} "), Style::default().fg(arrow_color)),
            Span::styled(trend, Style::default().fg(Color::Cyan)),
        ]);
        if i == app.selected {
            line = line.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        lines.push(line);
    }

    // Keep the cursor inside the viewport.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = app.selected.saturating_sub(visible.saturating_sub(1)) as u16;

    let para = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(para, area);
}

fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let only = if app.favorites_only {
        format!(" [{}]", app.catalog.get("favorites_only"))
    } else {
        String::new()
    };
    let help = format!(" q quit · tab switch · j/k move · f star · o favorites · enter history{only}");
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Renders the price-history overlay for one ticker on top of the tab.
pub fn render_detail(frame: &mut Frame, app: &App, ticker: &str) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " {}/{} — {} ",
            ticker,
            app.currency,
            app.catalog.get("recent_rates")
        ))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(series) = app.history.series(ticker) else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .split(inner);

    let scaled = scale_series(series);
    let spark = Sparkline::default()
        .data(&scaled)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(spark, layout[0]);

    // Newest point last, like the chart above it.
    let rows = layout[1].height as usize;
    let recent: Vec<Line> = series
        .iter()
        .rev()
        .take(rows)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .enumerate()
        .map(|(i, price)| {
            let text = format!("{:>16}", format_currency(*price, &app.currency));
            let style = if i + 1 == series.len().min(rows) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();
    frame.render_widget(Paragraph::new(recent), layout[1]);
}

/// A fixed-width string of bar glyphs for the most recent points.
fn trend_cell(series: &VecDeque<Decimal>) -> String {
    let points: Vec<Decimal> = series
        .iter()
        .rev()
        .take(TREND_POINTS)
        .copied()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let Some(min) = points.iter().min().copied() else {
        return String::new();
    };
    let max = points.iter().max().copied().unwrap_or(min);
    let span = max - min;

    points
        .iter()
        .map(|p| {
            if span.is_zero() {
                BARS[3]
            } else {
                let bucket = ((p - min) / span * Decimal::from(BARS.len() - 1))
                    .to_usize()
                    .unwrap_or(0)
                    .min(BARS.len() - 1);
                BARS[bucket]
            }
        })
        .collect()
}

/// Scales a decimal series onto `0..=100` for the sparkline widget.
fn scale_series(series: &VecDeque<Decimal>) -> Vec<u64> {
    let min = series.iter().min().copied().unwrap_or(Decimal::ZERO);
    let max = series.iter().max().copied().unwrap_or(Decimal::ZERO);
    let span = max - min;
    series
        .iter()
        .map(|p| {
            if span.is_zero() {
                1
            } else {
                ((p - min) / span * Decimal::ONE_HUNDRED)
                    .to_u64()
                    .unwrap_or(0)
            }
        })
        .collect()
}

/// Centers a `percent_x` × `percent_y` rect inside `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn signed_percent(percent: Decimal) -> String {
    if percent.is_sign_negative() {
        format!("{percent:.2}%")
    } else {
        format!("+{percent:.2}%")
    }
}

fn signed_amount(amount: Decimal, currency: &str) -> String {
    if amount.is_sign_negative() {
        format_currency(amount, currency)
    } else {
        format!("+{}", format_currency(amount, currency))
    }
}
