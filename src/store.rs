//! Local persistence for favorites and holdings.
//!
//! Two JSON files in the data directory: `favorites.json` (array of
//! tickers) and `holdings.json` (ticker → quantity). Both are read once
//! at startup and rewritten synchronously on every mutation. A missing or
//! corrupt file degrades to an empty default; it never fails the session.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

const FAVORITES_FILE: &str = "favorites.json";
const HOLDINGS_FILE: &str = "holdings.json";

/// Favorites and holdings, backed by files on disk.
#[derive(Debug)]
pub struct Store {
    dir: PathBuf,
    favorites: BTreeSet<String>,
    holdings: BTreeMap<String, Decimal>,
}

impl Store {
    /// Opens the store, reading both files from `dir`.
    ///
    /// Unreadable or corrupt files are logged and treated as empty.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let favorites = read_or_default(&dir.join(FAVORITES_FILE));
        let holdings = read_or_default(&dir.join(HOLDINGS_FILE));
        Self {
            dir,
            favorites,
            holdings,
        }
    }

    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    pub fn is_favorite(&self, ticker: &str) -> bool {
        self.favorites.contains(ticker)
    }

    /// Flips the favorite flag for a ticker and persists immediately.
    ///
    /// Returns whether the ticker is now favorited.
    ///
    /// # Errors
    ///
    /// Returns [`RatewatchError::Storage`](crate::RatewatchError::Storage)
    /// if the write fails. The in-memory state keeps the new value either
    /// way so the UI stays consistent with what the user did.
    pub fn toggle_favorite(&mut self, ticker: &str) -> crate::Result<bool> {
        let now_favorite = if !self.favorites.remove(ticker) {
            self.favorites.insert(ticker.to_string());
            true
        } else {
            false
        };
        write_json(&self.dir.join(FAVORITES_FILE), &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn holdings(&self) -> &BTreeMap<String, Decimal> {
        &self.holdings
    }

    pub fn holding(&self, ticker: &str) -> Option<Decimal> {
        self.holdings.get(ticker).copied()
    }

    /// Sets the held quantity for a ticker and persists immediately.
    ///
    /// A zero quantity removes the entry.
    ///
    /// # Errors
    ///
    /// Returns [`RatewatchError::Storage`](crate::RatewatchError::Storage)
    /// if the write fails.
    pub fn set_holding(&mut self, ticker: &str, quantity: Decimal) -> crate::Result<()> {
        if quantity.is_zero() {
            self.holdings.remove(ticker);
        } else {
            self.holdings.insert(ticker.to_string(), quantity);
        }
        write_json(&self.dir.join(HOLDINGS_FILE), &self.holdings)
    }
}

/// Reads a JSON file, falling back to `T::default()` on any failure.
fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read store file");
            return T::default();
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
            T::default()
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| {
        crate::RatewatchError::Storage(format!("failed to write {}: {e}", path.display()))
    })
}
