use crate::models::currency::Currency;
use crate::models::portfolio::Portfolio;

/// Fixed USD → EUR exchange rate. All stored prices are USD; EUR display
/// values are derived at read time.
pub const USD_TO_EUR_RATE: f64 = 1.11;

/// Converts stored USD amounts into a portfolio's display currency.
///
/// Stateless and infallible: `Currency` is a closed enum, so there is no
/// unsupported-currency path at runtime.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert a USD amount into the target currency, rounded to cents.
    /// USD → USD is the identity (still rounded).
    #[must_use]
    pub fn convert(&self, amount_usd: f64, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => Self::round_cents(amount_usd),
            Currency::Eur => Self::round_cents(amount_usd / USD_TO_EUR_RATE),
        }
    }

    /// Total value of all positions in a portfolio, in its display
    /// currency. The sum is converted once, after adding up USD values.
    #[must_use]
    pub fn portfolio_value(&self, portfolio: &Portfolio) -> f64 {
        self.convert(portfolio.total_value(), portfolio.currency)
    }

    fn round_cents(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
