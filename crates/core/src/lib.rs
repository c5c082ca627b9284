pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc};
use futures::future;
use std::sync::Arc;
use uuid::Uuid;

use models::{
    action::Action,
    chart::ChartRow,
    currency::Currency,
    history::{HistoricalSeries, HistoryCache},
    portfolio::{Portfolio, Stock},
};
use providers::traits::PriceGateway;
use services::{
    chart_service::ChartService, currency_service::CurrencyService,
    history_service::HistoryService, portfolio_service::PortfolioService,
};
use storage::manager::{StorageManager, HISTORY_KEY, PORTFOLIOS_KEY};

use errors::CoreError;

/// Maximum chart date range in days (10 years).
const MAX_CHART_RANGE_DAYS: i64 = 3650;

/// Main entry point for the portfolio tracker core library.
///
/// Owns the two pieces of shared state — the portfolio collection and the
/// historical-price cache — each behind an `Arc` snapshot that is swapped
/// wholesale on every committed change. Mutations go through the pure
/// reducer (`dispatch`) or through the async orchestration methods that
/// fetch prices first and dispatch afterwards.
#[must_use]
pub struct PortfolioTracker {
    portfolios: Arc<Vec<Portfolio>>,
    history: Arc<HistoryCache>,
    gateway: Box<dyn PriceGateway>,
    portfolio_service: PortfolioService,
    history_service: HistoryService,
    chart_service: ChartService,
    currency_service: CurrencyService,
    storage: Option<StorageManager>,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("portfolios", &self.portfolios.len())
            .field("cached_symbols", &self.history.symbol_count())
            .field("gateway", &self.gateway.name())
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}

impl PortfolioTracker {
    /// Create a tracker with empty state and no persistence.
    pub fn new(gateway: Box<dyn PriceGateway>) -> Self {
        Self::build(gateway, Vec::new(), HistoryCache::new(), None)
    }

    /// Create a tracker backed by a snapshot store. Both state buckets are
    /// loaded once here; every committed change saves the affected bucket
    /// back (last write wins).
    pub fn with_storage(
        gateway: Box<dyn PriceGateway>,
        storage: StorageManager,
    ) -> Result<Self, CoreError> {
        let portfolios = storage
            .load::<Vec<Portfolio>>(PORTFOLIOS_KEY)?
            .unwrap_or_default();
        let history = storage.load::<HistoryCache>(HISTORY_KEY)?.unwrap_or_default();
        Ok(Self::build(gateway, portfolios, history, Some(storage)))
    }

    // ── State Access ────────────────────────────────────────────────

    /// Current portfolio snapshot. Two calls return pointer-equal `Arc`s
    /// unless a mutation committed in between.
    #[must_use]
    pub fn portfolios(&self) -> &Arc<Vec<Portfolio>> {
        &self.portfolios
    }

    /// Current historical-price cache snapshot.
    #[must_use]
    pub fn history(&self) -> &Arc<HistoryCache> {
        &self.history
    }

    /// Look up a portfolio by its id.
    #[must_use]
    pub fn get_portfolio(&self, id: Uuid) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.id == id)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Apply one action to the portfolio collection. Never fails on
    /// unknown ids (those are logged no-ops); an `Err` here means the
    /// committed snapshot could not be persisted.
    pub fn dispatch(&mut self, action: Action) -> Result<(), CoreError> {
        let next = self.portfolio_service.apply(&self.portfolios, &action);
        if !Arc::ptr_eq(&next, &self.portfolios) {
            self.portfolios = next;
            self.persist_portfolios()?;
        }
        Ok(())
    }

    /// Add a stock to a portfolio: fetch the current price and the close
    /// price on the purchase date, then commit.
    ///
    /// The two user-facing failure messages are part of the contract:
    /// no record for the date → [`CoreError::NoStockData`], a record
    /// without a close price → [`CoreError::StockPriceMissing`]. Neither
    /// dispatches anything.
    pub async fn add_stock(
        &mut self,
        portfolio_id: Uuid,
        symbol: &str,
        purchase_date: NaiveDate,
        quantity: u32,
    ) -> Result<(), CoreError> {
        let latest = self.gateway.get_current_price(symbol).await?;
        let latest = self.validate_price(symbol, latest)?;

        let bar = match self.gateway.get_historical_bar(symbol, purchase_date).await {
            Ok(Some(bar)) => bar,
            Ok(None) => return Err(CoreError::NoStockData),
            Err(e) => {
                log::warn!("historical fetch for {symbol} on {purchase_date} failed: {e}");
                return Err(CoreError::NoStockData);
            }
        };
        let Some(value) = bar.close else {
            return Err(CoreError::StockPriceMissing);
        };
        let value = self.validate_price(symbol, value)?;

        self.dispatch(Action::AddStock {
            portfolio_id,
            symbol: symbol.to_string(),
            value,
            latest,
            quantity,
        })
    }

    /// Refresh every stock of a portfolio with its current price.
    ///
    /// All fetches run concurrently and are joined before anything is
    /// committed; stock ids and quantities are preserved. An unknown
    /// portfolio id is a logged no-op.
    pub async fn update_stocks(&mut self, portfolio_id: Uuid) -> Result<(), CoreError> {
        let Some(portfolio) = self.portfolios.iter().find(|p| p.id == portfolio_id) else {
            log::warn!("could not find portfolio with id {portfolio_id}");
            return Ok(());
        };
        let stocks = portfolio.stocks.clone();

        let gateway = self.gateway.as_ref();
        let fetches = stocks.iter().map(|stock| {
            let symbol = stock.symbol.clone();
            async move { gateway.get_current_price(&symbol).await }
        });
        let latest_prices = future::try_join_all(fetches).await?;

        let stocks: Vec<Stock> = stocks
            .into_iter()
            .zip(latest_prices)
            .map(|(stock, latest)| Stock {
                latest_value: latest,
                ..stock
            })
            .collect();
        for stock in &stocks {
            self.validate_price(&stock.symbol, stock.latest_value)?;
        }

        self.dispatch(Action::UpdateStocks {
            portfolio_id,
            stocks,
        })
    }

    // ── Historical Prices & Charts ──────────────────────────────────

    /// Bring the historical-price cache up to date for a set of symbols.
    ///
    /// Symbols already fetched today (UTC) are untouched; the rest are
    /// fetched concurrently and committed as one atomic swap. A symbol
    /// whose fetch fails still gets an entry, with no plottable points.
    pub async fn refresh_history(&mut self, symbols: &[String]) -> Result<(), CoreError> {
        let today = Utc::now().date_naive();
        let next = self
            .history_service
            .refresh(&self.history, symbols, self.gateway.as_ref(), today)
            .await;
        if !Arc::ptr_eq(&next, &self.history) {
            self.history = next;
            self.persist_history()?;
        }
        Ok(())
    }

    /// Build date-aligned chart rows for a set of symbols.
    ///
    /// Returns no rows at all until *every* requested symbol has a cache
    /// entry — the caller refreshes first and renders complete charts
    /// only, never partial ones.
    pub fn chart_rows(
        &self,
        symbols: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ChartRow>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        let range_days = (to - from).num_days();
        if range_days > MAX_CHART_RANGE_DAYS {
            return Err(CoreError::ValidationError(format!(
                "Chart range of {range_days} days exceeds maximum of {MAX_CHART_RANGE_DAYS} days (10 years)"
            )));
        }

        let mut series_set: Vec<&HistoricalSeries> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.history.get(symbol) {
                Some(series) => series_set.push(series),
                None => {
                    log::debug!("history for {symbol} not loaded yet, skipping chart build");
                    return Ok(Vec::new());
                }
            }
        }

        self.chart_service.align(&series_set, from, to)
    }

    // ── Currency ────────────────────────────────────────────────────

    /// Convert a USD amount into a display currency, rounded to cents.
    #[must_use]
    pub fn convert(&self, amount_usd: f64, currency: Currency) -> f64 {
        self.currency_service.convert(amount_usd, currency)
    }

    /// Total value of a portfolio in its own display currency.
    #[must_use]
    pub fn portfolio_value(&self, portfolio_id: Uuid) -> Option<f64> {
        self.get_portfolio(portfolio_id)
            .map(|p| self.currency_service.portfolio_value(p))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        gateway: Box<dyn PriceGateway>,
        portfolios: Vec<Portfolio>,
        history: HistoryCache,
        storage: Option<StorageManager>,
    ) -> Self {
        Self {
            portfolios: Arc::new(portfolios),
            history: Arc::new(history),
            gateway,
            portfolio_service: PortfolioService::new(),
            history_service: HistoryService::new(),
            chart_service: ChartService::new(),
            currency_service: CurrencyService::new(),
            storage,
        }
    }

    /// Reject non-finite or negative prices from the quote service.
    fn validate_price(&self, symbol: &str, price: f64) -> Result<f64, CoreError> {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::Api {
                provider: self.gateway.name().to_string(),
                message: format!(
                    "Invalid price returned for {symbol}: {price} (must be finite and non-negative)"
                ),
            });
        }
        Ok(price)
    }

    fn persist_portfolios(&self) -> Result<(), CoreError> {
        if let Some(storage) = &self.storage {
            storage.save(PORTFOLIOS_KEY, self.portfolios.as_ref())?;
        }
        Ok(())
    }

    fn persist_history(&self) -> Result<(), CoreError> {
        if let Some(storage) = &self.storage {
            storage.save(HISTORY_KEY, self.history.as_ref())?;
        }
        Ok(())
    }
}
