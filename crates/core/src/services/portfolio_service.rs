use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::action::Action;
use crate::models::portfolio::{Portfolio, Stock};

/// Deterministic reducer over the portfolio collection.
///
/// Pure business logic — no I/O, no API calls, no panics. Each `apply`
/// consumes a snapshot and produces the next one; a no-op returns the
/// input `Arc` untouched, so `Arc::ptr_eq` tells observers whether
/// anything changed without comparing contents.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Apply one action to the current snapshot and return the next one.
    ///
    /// Unknown portfolio ids never fail: the miss is logged and the input
    /// snapshot is returned unchanged.
    pub fn apply(&self, state: &Arc<Vec<Portfolio>>, action: &Action) -> Arc<Vec<Portfolio>> {
        match action {
            Action::AddPortfolio { name } => {
                let mut next = state.as_ref().clone();
                next.push(Portfolio::new(name.clone()));
                Arc::new(next)
            }

            Action::RemovePortfolio { id } => {
                if !state.iter().any(|p| p.id == *id) {
                    return Arc::clone(state);
                }
                Arc::new(state.iter().filter(|p| p.id != *id).cloned().collect())
            }

            Action::AddStock {
                portfolio_id,
                symbol,
                value,
                latest,
                quantity,
            } => Self::update_portfolio(state, *portfolio_id, |portfolio| {
                let mut updated = portfolio.clone();
                updated
                    .stocks
                    .push(Stock::new(symbol.clone(), *value, *latest, *quantity));
                updated
            }),

            Action::RemoveStocks {
                portfolio_id,
                stock_ids,
            } => {
                let ids: HashSet<Uuid> = stock_ids.iter().copied().collect();
                Self::update_portfolio(state, *portfolio_id, |portfolio| {
                    let mut updated = portfolio.clone();
                    // Ids with no matching stock are silently skipped
                    updated.stocks.retain(|s| !ids.contains(&s.id));
                    updated
                })
            }

            Action::UpdateStocks {
                portfolio_id,
                stocks,
            } => Self::update_portfolio(state, *portfolio_id, |portfolio| {
                let mut updated = portfolio.clone();
                updated.stocks = stocks.clone();
                updated
            }),

            Action::ChangeCurrency {
                portfolio_id,
                currency,
            } => Self::update_portfolio(state, *portfolio_id, |portfolio| {
                let mut updated = portfolio.clone();
                updated.currency = *currency;
                updated
            }),
        }
    }

    /// Rebuild the snapshot with one portfolio replaced by `edit(portfolio)`.
    /// A missing id is reported and leaves the snapshot untouched.
    fn update_portfolio(
        state: &Arc<Vec<Portfolio>>,
        portfolio_id: Uuid,
        edit: impl FnOnce(&Portfolio) -> Portfolio,
    ) -> Arc<Vec<Portfolio>> {
        let Some(index) = state.iter().position(|p| p.id == portfolio_id) else {
            log::warn!("could not find portfolio with id {portfolio_id}");
            return Arc::clone(state);
        };

        let mut next = state.as_ref().clone();
        next[index] = edit(&state[index]);
        Arc::new(next)
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
