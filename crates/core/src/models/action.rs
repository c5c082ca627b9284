use uuid::Uuid;

use super::currency::Currency;
use super::portfolio::Stock;

/// The closed set of transitions the portfolio reducer understands.
///
/// Actions are plain data: any async work (price fetches) happens *before*
/// an action is built, so applying one is always synchronous and pure.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a new empty portfolio with a fresh id.
    AddPortfolio { name: String },

    /// Remove the portfolio with this id, if present.
    RemovePortfolio { id: Uuid },

    /// Append a new stock to the target portfolio. `value` is the purchase
    /// price, `latest` the current price, both in USD.
    AddStock {
        portfolio_id: Uuid,
        symbol: String,
        value: f64,
        latest: f64,
        quantity: u32,
    },

    /// Remove all listed stocks from the target portfolio. Ids that don't
    /// match anything are silently skipped.
    RemoveStocks {
        portfolio_id: Uuid,
        stock_ids: Vec<Uuid>,
    },

    /// Replace the target portfolio's entire stock list. The caller has
    /// already fetched fresh latest prices and preserved ids and quantities.
    UpdateStocks {
        portfolio_id: Uuid,
        stocks: Vec<Stock>,
    },

    /// Set the target portfolio's display currency.
    ChangeCurrency {
        portfolio_id: Uuid,
        currency: Currency,
    },
}
