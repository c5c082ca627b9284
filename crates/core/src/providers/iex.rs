use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::{DailyBar, PriceGateway, SeriesBar};
use crate::errors::CoreError;

const BASE_URL: &str = "https://sandbox.iexapis.com/stable";

/// IEX Cloud API gateway for stock quotes and daily chart history.
///
/// - **Coverage**: US equities, real-time quotes + daily OHLCV history.
/// - **Auth**: token passed as a query parameter on every request.
/// - **Endpoints used**: `/stock/{symbol}/quote/latestPrice`,
///   `/stock/{symbol}/chart/date/{YYYYMMDD}?chartByDay=true`,
///   `/stock/{symbol}/chart/5y`.
///
/// All prices are in USD. The `uOpen`/`uClose` fields are the unadjusted
/// prices and can be missing from a bar; they are surfaced as `Option`
/// so callers decide how to degrade.
pub struct IexProvider {
    client: Client,
    base_url: String,
    token: String,
}

impl IexProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, BASE_URL)
    }

    /// Point the gateway at a different host (e.g., a local stub server).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

// ── IEX API response types ──────────────────────────────────────────

/// One bar of the `/chart/...` endpoints. Only the fields we consume.
#[derive(Debug, Deserialize)]
struct ChartBar {
    date: NaiveDate,
    #[serde(rename = "uOpen")]
    u_open: Option<f64>,
    #[serde(rename = "uClose")]
    u_close: Option<f64>,
}

#[async_trait]
impl PriceGateway for IexProvider {
    fn name(&self) -> &str {
        "IEX Cloud"
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let url = format!(
            "{}/stock/{}/quote/latestPrice?token={}",
            self.base_url, symbol, self.token
        );

        // The endpoint returns a bare JSON number
        let price: f64 = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "IEX Cloud".into(),
                message: format!("Failed to parse latest price for {symbol}: {e}"),
            })?;

        Ok(price)
    }

    async fn get_historical_bar(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyBar>, CoreError> {
        let date_str = date.format("%Y%m%d");
        let url = format!(
            "{}/stock/{}/chart/date/{}?chartByDay=true&token={}",
            self.base_url, symbol, date_str, self.token
        );

        let bars: Vec<ChartBar> = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "IEX Cloud".into(),
                message: format!("Failed to parse daily bar for {symbol} on {date}: {e}"),
            })?;

        // chartByDay yields at most one bar; an empty array means the
        // service has no record for that day.
        Ok(bars.into_iter().next().map(|bar| DailyBar {
            date: bar.date,
            close: bar.u_close,
        }))
    }

    async fn get_history(&self, symbol: &str) -> Result<Vec<SeriesBar>, CoreError> {
        let url = format!(
            "{}/stock/{}/chart/5y?token={}",
            self.base_url, symbol, self.token
        );

        let bars: Vec<ChartBar> = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "IEX Cloud".into(),
                message: format!("Failed to parse history for {symbol}: {e}"),
            })?;

        Ok(bars
            .into_iter()
            .map(|bar| SeriesBar {
                date: bar.date,
                open: bar.u_open,
            })
            .collect())
    }
}
