use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;

/// One daily bar for a specific date, as returned by the quote service.
///
/// `close` is optional: the upstream feed omits the field for some
/// symbols/days, and callers must handle that case explicitly rather than
/// trusting every record to carry a price.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

/// One bar of a multi-year daily history. `open` is optional for the same
/// reason `DailyBar::close` is.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
}

/// Trait abstraction for the price quote service.
///
/// The tracker only ever talks to this trait; the HTTP implementation can
/// be swapped (or mocked in tests) without touching the rest of the
/// codebase. Every method is a single attempt — no retries, no fallback.
#[async_trait]
pub trait PriceGateway: Send + Sync {
    /// Human-readable name of this gateway (for logs/errors).
    fn name(&self) -> &str;

    /// Get the latest traded price of a stock, in USD.
    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError>;

    /// Get the daily bar for one specific date. `Ok(None)` means the
    /// service has no record at all for that symbol/date.
    async fn get_historical_bar(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyBar>, CoreError>;

    /// Get up to 5 years of daily bars, oldest first.
    async fn get_history(&self, symbol: &str) -> Result<Vec<SeriesBar>, CoreError>;
}
