use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single price data point (date → value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One symbol's daily price history plus the date it was last fetched.
///
/// Points are kept sorted ascending by date. A refresh replaces the whole
/// series; points are never merged into an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    /// Ticker symbol this series belongs to
    pub symbol: String,

    /// Calendar date of the last successful fetch
    pub update_date: NaiveDate,

    /// Daily open prices, sorted ascending by date
    pub points: Vec<PricePoint>,
}

impl HistoricalSeries {
    pub fn new(symbol: impl Into<String>, update_date: NaiveDate, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            update_date,
            points,
        }
    }

    /// `true` if this series was fetched on the given calendar day and
    /// must not be fetched again that day.
    #[must_use]
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.update_date == today
    }

    /// Get the value for exactly this date. Returns None for days with no
    /// data (weekends, holidays). Uses binary search (O(log n)).
    #[must_use]
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.points[idx].value)
    }
}

/// Local cache of historical price series, one entry per symbol.
///
/// Owned behind an `Arc` by the tracker; a refresh builds a new cache and
/// swaps it in atomically, so observers see either the fully-updated cache
/// or the previous one, never a partial mix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryCache {
    /// symbol → series (keys unique)
    pub series: HashMap<String, HistoricalSeries>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached series for a symbol, if any.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&HistoricalSeries> {
        self.series.get(symbol)
    }

    /// `true` if a series (even an empty one) exists for this symbol.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.series.contains_key(symbol)
    }

    /// Insert or replace the series for `series.symbol`.
    pub fn insert(&mut self, series: HistoricalSeries) {
        self.series.insert(series.symbol.clone(), series);
    }

    /// Number of distinct symbols cached.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }

    /// Total number of cached price points across all symbols.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.series.values().map(|s| s.points.len()).sum()
    }
}
