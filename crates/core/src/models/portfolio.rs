use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::Currency;

/// A single purchased position inside a portfolio.
///
/// Both prices are stored in USD; conversion to the portfolio's display
/// currency happens at read time, never in the stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Unique within the owning portfolio, generated once at add time
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "AAPL", "MSFT")
    pub symbol: String,

    /// Purchase price in USD (close price on the purchase date)
    pub initial_value: f64,

    /// Price in USD as of the last refresh
    pub latest_value: f64,

    /// Number of shares (always positive)
    pub quantity: u32,
}

impl Stock {
    pub fn new(
        symbol: impl Into<String>,
        initial_value: f64,
        latest_value: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            initial_value,
            latest_value,
            quantity,
        }
    }

    /// Current value of the whole position, in USD.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.latest_value * f64::from(self.quantity)
    }
}

/// A named, user-owned group of stock holdings with a display currency.
///
/// Stocks keep their insertion order; that order is the display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Unique across the whole collection, generated once at creation
    pub id: Uuid,

    /// User-chosen display name (not validated here; that is the UI's job)
    pub name: String,

    /// Currency used when rendering values
    pub currency: Currency,

    /// All holdings, in insertion order
    pub stocks: Vec<Stock>,
}

impl Portfolio {
    /// Create an empty portfolio with the default display currency (EUR).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            currency: Currency::Eur,
            stocks: Vec::new(),
        }
    }

    /// Look up a stock by its id.
    #[must_use]
    pub fn stock(&self, id: Uuid) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.id == id)
    }

    /// Sum of all positions' current values, in USD.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.stocks.iter().map(Stock::total_value).sum()
    }
}
