use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar day of chart data: the date plus each symbol's value on
/// that day, keyed by symbol.
///
/// A symbol with no data point on this day is absent from `values` (and
/// from the serialized row) — the frontend renders the gap by connecting
/// the neighboring known points, not by plotting zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    /// The date for this row
    pub date: NaiveDate,

    /// symbol → value for every symbol that has a point on this date
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl ChartRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: BTreeMap::new(),
        }
    }

    /// Value for a symbol on this day, if it has one.
    #[must_use]
    pub fn value(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }
}
