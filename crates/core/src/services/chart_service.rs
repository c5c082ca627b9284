use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::chart::ChartRow;
use crate::models::history::HistoricalSeries;

/// Aligns a set of per-symbol series into one date-indexed table.
///
/// The core computes the rows — the frontend only renders. One row per
/// calendar day from `from` to `to` inclusive, whether or not any series
/// has data on that day; a series with no point on a day simply leaves its
/// key out of the row.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build chart rows for a date range.
    ///
    /// Output ordering is strictly ascending by date and the output length
    /// is exactly `to - from + 1` days regardless of how much underlying
    /// data exists.
    pub fn align(
        &self,
        series_set: &[&HistoricalSeries],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ChartRow>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }

        let mut rows = Vec::new();
        let mut current_date = from;

        while current_date <= to {
            let mut row = ChartRow::new(current_date);
            for series in series_set {
                if let Some(value) = series.value_on(current_date) {
                    row.values.insert(series.symbol.clone(), value);
                }
            }
            rows.push(row);

            current_date = match current_date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(rows)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
