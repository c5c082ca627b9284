use chrono::NaiveDate;
use futures::future;
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::history::{HistoricalSeries, HistoryCache, PricePoint};
use crate::providers::traits::PriceGateway;

/// Refreshes the historical-price cache under the daily staleness policy.
///
/// A cached series is reused only if it was fetched on the current calendar
/// day; anything older is replaced wholesale. All fetches of one batch run
/// concurrently and the results are committed as a single cache swap, so a
/// chart observing the cache re-renders once per batch, not once per symbol.
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// Refresh the cache for the requested symbols and return the next
    /// snapshot.
    ///
    /// Each symbol is judged against the *pre-refresh* snapshot: missing or
    /// stale entries are fetched, entries already fetched `today` are left
    /// untouched. If nothing needed a fetch the input `Arc` is returned
    /// unchanged. A failed or malformed fetch degrades to an empty point
    /// list for that symbol and never blocks the rest of the batch.
    pub async fn refresh(
        &self,
        cache: &Arc<HistoryCache>,
        symbols: &[String],
        gateway: &dyn PriceGateway,
        today: NaiveDate,
    ) -> Arc<HistoryCache> {
        let mut seen = HashSet::new();
        let to_fetch: Vec<&String> = symbols
            .iter()
            .filter(|symbol| seen.insert(symbol.as_str()))
            .filter(|symbol| match cache.get(symbol) {
                Some(series) if series.is_fresh(today) => {
                    log::debug!("history for {symbol} already fetched today, keeping it");
                    false
                }
                Some(_) => {
                    log::info!("history for {symbol} is stale, replacing it");
                    true
                }
                None => {
                    log::info!("fetching history for new symbol {symbol}");
                    true
                }
            })
            .collect();

        if to_fetch.is_empty() {
            return Arc::clone(cache);
        }

        let fetches = to_fetch.into_iter().map(|symbol| async move {
            let points = Self::fetch_points(gateway, symbol).await;
            HistoricalSeries::new(symbol.clone(), today, points)
        });
        let fetched = future::join_all(fetches).await;

        // One atomic swap for the whole batch
        let mut next = cache.as_ref().clone();
        for series in fetched {
            next.insert(series);
        }
        Arc::new(next)
    }

    /// Fetch one symbol's full series and map it to price points.
    ///
    /// A gateway failure, or a payload whose bars lack the open-price
    /// field, yields an empty point list: the symbol still gets a cache
    /// entry, just one with nothing to plot.
    async fn fetch_points(gateway: &dyn PriceGateway, symbol: &str) -> Vec<PricePoint> {
        let bars = match gateway.get_history(symbol).await {
            Ok(bars) => bars,
            Err(e) => {
                log::warn!("history fetch for {symbol} failed: {e}");
                return Vec::new();
            }
        };

        match bars.first() {
            Some(first) if first.open.is_some() => {
                let mut points: Vec<PricePoint> = bars
                    .iter()
                    .filter_map(|bar| {
                        Some(PricePoint {
                            date: bar.date,
                            value: bar.open?,
                        })
                    })
                    .collect();
                points.sort_by_key(|p| p.date);
                points
            }
            Some(_) => {
                log::warn!("invalid response for {symbol}: bars lack an open price");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
