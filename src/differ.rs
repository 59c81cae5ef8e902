//! Snapshot differencing.
//!
//! Compares two consecutive poll results and derives everything the UI
//! shows between polls: a per-ticker price direction, the single biggest
//! gainer, and a bounded rolling history of recent prices per ticker.
//! [`diff`] is a pure function of its inputs; the previous snapshot and
//! prior history are owned by the caller and never mutated here.

use std::cmp::Ordering;
use std::collections::{BTreeMap, VecDeque};

use rust_decimal::Decimal;

use crate::models::RateSnapshot;

/// Minimum price below which a ticker is excluded from top-gainer ranking.
pub const DUST_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Price movement of one ticker relative to the previous poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Same,
}

/// Ticker → direction for every ticker in the current snapshot.
pub type DirectionMap = BTreeMap<String, Direction>;

/// The ticker with the largest positive percentage change this cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct TopGainer {
    pub ticker: String,
    /// Absolute price change since the previous poll.
    pub change: Decimal,
    /// Percentage change relative to the previous price.
    pub percent: Decimal,
}

/// Bounded per-ticker price history, oldest point first.
///
/// Append-only across tickers: a ticker that disappears from later
/// snapshots keeps its last series until it reappears.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RollingHistory {
    series: BTreeMap<String, VecDeque<Decimal>>,
}

impl RollingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one point, evicting the oldest once `window` is exceeded.
    fn push(&mut self, ticker: &str, price: Decimal, window: usize) {
        let series = self
            .series
            .entry(ticker.to_string())
            .or_insert_with(|| VecDeque::with_capacity(window));
        if series.len() >= window {
            series.pop_front();
        }
        series.push_back(price);
    }

    /// The recorded series for a ticker, oldest first.
    pub fn series(&self, ticker: &str) -> Option<&VecDeque<Decimal>> {
        self.series.get(ticker)
    }

    /// Number of tickers with at least one recorded point.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Everything derived from one diff cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffOutcome {
    pub direction: DirectionMap,
    pub top_gainer: Option<TopGainer>,
    pub history: RollingHistory,
}

/// Diffs the current snapshot against the previous one.
///
/// With no previous snapshot (first successful poll) the comparison is
/// skipped entirely: the direction map is empty, there is no top gainer,
/// and the history is seeded with one point per ticker. A ticker missing
/// from the previous snapshot is compared against a price of zero, so it
/// classifies `Up` on first appearance with a nonzero price.
///
/// Top-gainer candidates must have a current price above
/// [`DUST_THRESHOLD`] and a nonzero previous price; among candidates the
/// strictly greatest positive percent change wins, first ticker (in
/// snapshot order) on ties. Tickers whose previous price was zero have no
/// meaningful percentage and are excluded from the ranking.
pub fn diff(
    previous: Option<&RateSnapshot>,
    current: &RateSnapshot,
    history: &RollingHistory,
    window: usize,
) -> DiffOutcome {
    let mut direction = DirectionMap::new();
    let mut history = history.clone();

    if current.is_empty() {
        return DiffOutcome {
            direction,
            top_gainer: None,
            history,
        };
    }

    let Some(previous) = previous else {
        for (ticker, price) in current.iter() {
            history.push(ticker, price, window);
        }
        return DiffOutcome {
            direction,
            top_gainer: None,
            history,
        };
    };

    let mut top_gainer: Option<TopGainer> = None;

    for (ticker, price) in current.iter() {
        let prev = previous.get(ticker).unwrap_or(Decimal::ZERO);
        let change = price - prev;
        let percent = if prev != Decimal::ZERO {
            change / prev * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let movement = match price.cmp(&prev) {
            Ordering::Greater => Direction::Up,
            Ordering::Less => Direction::Down,
            Ordering::Equal => Direction::Same,
        };
        direction.insert(ticker.to_string(), movement);

        let eligible = price > DUST_THRESHOLD && prev != Decimal::ZERO && percent > Decimal::ZERO;
        if eligible && top_gainer.as_ref().is_none_or(|best| percent > best.percent) {
            top_gainer = Some(TopGainer {
                ticker: ticker.to_string(),
                change,
                percent,
            });
        }

        history.push(ticker, price, window);
    }

    DiffOutcome {
        direction,
        top_gainer,
        history,
    }
}
