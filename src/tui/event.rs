//! Event handling for the TUI.

use std::str::FromStr;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::models::RateSnapshot;
use crate::tui::input::QuantityInput;

use super::app::{App, Mode, Tab};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// A poll produced a parsed snapshot.
    Rates(RateSnapshot),
    /// A poll cycle failed (fetch, status, or price parsing).
    PollFailed(String),

    /// Request to quit the application.
    Quit,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Rates(snapshot) => app.apply_snapshot(snapshot),
        Message::PollFailed(reason) => app.record_poll_failure(reason),
        Message::Quit => app.should_quit = true,
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => {}
        Event::Tick => app.clear_stale_errors(),
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return;
        }
        KeyCode::Esc => {
            if app.mode == Mode::Insert {
                cancel_edit(app);
            } else {
                app.detail = None;
            }
            return;
        }
        _ => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Tab navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
        }
        KeyCode::BackTab => app.previous_tab(),

        _ => match app.current_tab() {
            Tab::Rates => handle_rates_tab_keys(app, key),
            Tab::Portfolio => handle_portfolio_tab_keys(app, key),
        },
    }
}

/// Handles keys for the rates tab.
fn handle_rates_tab_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let rows = app.visible_tickers().len();
            if app.selected + 1 < rows {
                app.selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected = app.selected.saturating_sub(1);
        }

        // Star/unstar the selected ticker
        KeyCode::Char('f') => {
            if let Some(ticker) = app.selected_ticker()
                && let Err(e) = app.store.toggle_favorite(&ticker)
            {
                app.show_error(e.to_string());
            }
            app.clamp_selection();
        }

        // Restrict the grid to favorites
        KeyCode::Char('o') => {
            app.favorites_only = !app.favorites_only;
            app.clamp_selection();
        }

        // Open the price-history overlay
        KeyCode::Enter => {
            app.detail = app.selected_ticker();
        }

        _ => {}
    }
}

/// Handles keys for the portfolio tab.
fn handle_portfolio_tab_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let rows = app.portfolio_tickers().len();
            if app.portfolio_selected + 1 < rows {
                app.portfolio_selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.portfolio_selected = app.portfolio_selected.saturating_sub(1);
        }

        // Edit the held quantity of the selected ticker
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(ticker) = app.selected_portfolio_ticker() {
                let current = app
                    .store
                    .holding(&ticker)
                    .map(|q| q.to_string())
                    .unwrap_or_default();
                app.quantity_input = QuantityInput::with_value(&current);
                app.editing_ticker = Some(ticker);
                app.mode = Mode::Insert;
            }
        }

        // Drop the selected holding
        KeyCode::Char('d') => {
            if let Some(ticker) = app.selected_portfolio_ticker()
                && let Err(e) = app.store.set_holding(&ticker, Decimal::ZERO)
            {
                app.show_error(e.to_string());
            }
            app.clamp_selection();
        }

        _ => {}
    }
}

/// Handles keys in insert mode (quantity entry).
fn handle_insert_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => commit_quantity(app),
        KeyCode::Char(c) => app.quantity_input.insert(c),
        KeyCode::Backspace => app.quantity_input.backspace(),
        KeyCode::Delete => app.quantity_input.delete(),
        KeyCode::Left => app.quantity_input.move_left(),
        KeyCode::Right => app.quantity_input.move_right(),
        KeyCode::Home => app.quantity_input.move_home(),
        KeyCode::End => app.quantity_input.move_end(),
        _ => {}
    }
}

/// Parses and persists the typed quantity. An empty entry clears the holding.
fn commit_quantity(app: &mut App) {
    let Some(ticker) = app.editing_ticker.take() else {
        app.mode = Mode::Normal;
        return;
    };
    let raw = app.quantity_input.take();
    app.mode = Mode::Normal;

    let quantity = if raw.is_empty() {
        Decimal::ZERO
    } else {
        match Decimal::from_str(&raw) {
            Ok(q) => q,
            Err(_) => {
                app.show_error(format!("invalid quantity: {raw}"));
                return;
            }
        }
    };

    if let Err(e) = app.store.set_holding(&ticker, quantity) {
        app.show_error(e.to_string());
    }
    app.clamp_selection();
}

fn cancel_edit(app: &mut App) {
    app.quantity_input.take();
    app.editing_ticker = None;
    app.mode = Mode::Normal;
}
