//! Application state for the TUI.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::config::AppConfig;
use crate::differ::{self, DirectionMap, RollingHistory, TopGainer};
use crate::locale::Catalog;
use crate::models::RateSnapshot;
use crate::portfolio::{self, PortfolioValuation};
use crate::store::Store;
use crate::tui::input::QuantityInput;

/// Central application state container.
pub struct App {
    // -- Tab State --
    /// Fixed tab order: rates grid, then portfolio.
    pub tabs: Vec<Tab>,
    /// Index of the currently active tab.
    pub active_tab: usize,

    // -- Market State --
    /// Most recent successfully parsed snapshot.
    pub snapshot: Option<RateSnapshot>,
    /// Direction of each ticker relative to the previous poll.
    pub direction: DirectionMap,
    /// Largest positive percentage mover of the last cycle.
    pub top_gainer: Option<TopGainer>,
    /// Bounded price history per ticker.
    pub history: RollingHistory,
    /// Capacity of each ticker's history series.
    pub history_window: usize,
    /// Reference currency the prices are quoted in.
    pub currency: String,

    // -- Poll State --
    pub poll_status: PollStatus,
    /// When the last successful snapshot arrived.
    pub last_update: Option<Instant>,

    // -- Persistence --
    pub store: Store,

    // -- UI State --
    pub catalog: Catalog,
    /// Selected row in the rates grid.
    pub selected: usize,
    /// Restrict the rates grid to favorited tickers.
    pub favorites_only: bool,
    /// Ticker whose history overlay is open.
    pub detail: Option<String>,
    /// Selected row in the portfolio table.
    pub portfolio_selected: usize,
    /// Current input mode.
    pub mode: Mode,
    /// Quantity being typed in the portfolio editor.
    pub quantity_input: QuantityInput,
    /// Ticker the quantity editor is targeting.
    pub editing_ticker: Option<String>,
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the initial state from config and the opened store.
    pub fn new(config: &AppConfig, store: Store, catalog: Catalog) -> Self {
        Self {
            tabs: vec![Tab::Rates, Tab::Portfolio],
            active_tab: 0,

            snapshot: None,
            direction: DirectionMap::new(),
            top_gainer: None,
            history: RollingHistory::new(),
            history_window: config.poll.history_window,
            currency: config.api.currency.clone(),

            poll_status: PollStatus::Loading,
            last_update: None,

            store,

            catalog,
            selected: 0,
            favorites_only: false,
            detail: None,
            portfolio_selected: 0,
            mode: Mode::Normal,
            quantity_input: QuantityInput::default(),
            editing_ticker: None,
            error_message: None,

            should_quit: false,
        }
    }

    /// Folds a fresh snapshot into the derived state.
    ///
    /// Runs the differ against the previously held snapshot, then replaces
    /// it whole. This is the only place the previous-snapshot value changes.
    pub fn apply_snapshot(&mut self, snapshot: RateSnapshot) {
        let outcome = differ::diff(
            self.snapshot.as_ref(),
            &snapshot,
            &self.history,
            self.history_window,
        );
        self.direction = outcome.direction;
        self.top_gainer = outcome.top_gainer;
        self.history = outcome.history;
        self.snapshot = Some(snapshot);
        self.poll_status = PollStatus::Live;
        self.last_update = Some(Instant::now());
        self.clamp_selection();
    }

    /// Marks the current cycle as failed, keeping whatever data we have.
    pub fn record_poll_failure(&mut self, message: String) {
        self.poll_status = if self.snapshot.is_some() {
            PollStatus::Stale
        } else {
            PollStatus::Failed
        };
        self.show_error(message);
    }

    /// Tickers shown in the rates grid, honoring the favorites filter.
    pub fn visible_tickers(&self) -> Vec<String> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        snapshot
            .tickers()
            .filter(|t| !self.favorites_only || self.store.is_favorite(t))
            .map(String::from)
            .collect()
    }

    /// Ticker under the cursor in the rates grid.
    pub fn selected_ticker(&self) -> Option<String> {
        self.visible_tickers().get(self.selected).cloned()
    }

    /// Rows of the portfolio table: every ticker in the snapshot plus any
    /// held ticker that has since disappeared from it.
    pub fn portfolio_tickers(&self) -> Vec<String> {
        let mut tickers: BTreeSet<String> = self.store.holdings().keys().cloned().collect();
        if let Some(snapshot) = &self.snapshot {
            tickers.extend(snapshot.tickers().map(String::from));
        }
        tickers.into_iter().collect()
    }

    /// Ticker under the cursor in the portfolio table.
    pub fn selected_portfolio_ticker(&self) -> Option<String> {
        self.portfolio_tickers().get(self.portfolio_selected).cloned()
    }

    /// Values current holdings against the current snapshot.
    pub fn valuation(&self) -> PortfolioValuation {
        portfolio::value(self.store.holdings(), self.snapshot.as_ref())
    }

    /// Keeps both cursors inside their row counts after data changes.
    pub fn clamp_selection(&mut self) {
        let rates_rows = self.visible_tickers().len();
        if self.selected >= rates_rows {
            self.selected = rates_rows.saturating_sub(1);
        }
        let portfolio_rows = self.portfolio_tickers().len();
        if self.portfolio_selected >= portfolio_rows {
            self.portfolio_selected = portfolio_rows.saturating_sub(1);
        }
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.active_tab = self
            .active_tab
            .checked_sub(1)
            .unwrap_or(self.tabs.len() - 1);
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than 5 seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > std::time::Duration::from_secs(5)
        {
            self.error_message = None;
        }
    }
}

/// Tab types in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Rates,
    Portfolio,
}

impl Tab {
    /// Catalog key of the tab title.
    pub fn title_key(&self) -> &'static str {
        match self {
            Tab::Rates => "rates",
            Tab::Portfolio => "portfolio",
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing a holding quantity in the portfolio tab.
    Insert,
}

/// Where the poll loop currently stands, from the display's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PollStatus {
    /// No data yet, first fetch still in flight.
    #[default]
    Loading,
    /// Last poll succeeded.
    Live,
    /// We have data but the last poll failed.
    Stale,
    /// No data has ever arrived and polls are failing.
    Failed,
}

impl PollStatus {
    /// Returns a display string for the status.
    pub fn label(&self) -> &'static str {
        match self {
            PollStatus::Loading => "Loading",
            PollStatus::Live => "Live",
            PollStatus::Stale => "Stale",
            PollStatus::Failed => "Offline",
        }
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
