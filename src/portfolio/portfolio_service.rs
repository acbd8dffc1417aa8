use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::currency_wallet::CurrencyWallet;
use super::portfolio_errors::PortfolioError;
use super::portfolio_model::{percent_change, PortfolioReport, PositionReport};
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::ledger::PositionRepositoryTrait;
use crate::market_data::{MarketDataError, QuoteServiceTrait};

/// Trait defining the contract for portfolio reporting.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn get_portfolio(
        &self,
        platform_user_id: &str,
        username: &str,
    ) -> Result<PortfolioReport>;
}

/// Builds the full per-symbol report plus wallet summary for one user.
///
/// Quotes for all distinct tickers are fetched in one batched round trip;
/// any symbol that fails to quote fails the whole report with per-symbol
/// attribution (see [`MarketDataError::PartialFailure`]).
pub struct PortfolioService {
    repository: Arc<dyn PositionRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PositionRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        Self {
            repository,
            quote_service,
            fx_service,
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_portfolio(
        &self,
        platform_user_id: &str,
        username: &str,
    ) -> Result<PortfolioReport> {
        let (user, _) = self
            .repository
            .get_or_create_user(platform_user_id, username)
            .await?;

        let positions = self.repository.list_positions(&user.id).await?;
        if positions.is_empty() {
            return Err(PortfolioError::NoPositions.into());
        }
        debug!(
            "Building portfolio for {} across {} positions",
            user.username,
            positions.len()
        );

        // Distinct tickers, in row order.
        let mut seen = HashSet::new();
        let tickers: Vec<String> = positions
            .iter()
            .filter(|(_, symbol)| seen.insert(symbol.ticker.clone()))
            .map(|(_, symbol)| symbol.ticker.clone())
            .collect();

        let quotes = self.quote_service.get_latest_quotes(&tickers).await?;

        let mut wallet = CurrencyWallet::new();
        let mut rows = Vec::with_capacity(positions.len());

        for (position, symbol) in positions {
            let quote = quotes
                .get(&symbol.ticker)
                .ok_or_else(|| MarketDataError::NotFound(symbol.ticker.clone()))?;

            let book_value = position.total_cost;
            let current_total = quote.price * Decimal::from(position.amount);
            let pl = current_total - book_value;

            wallet.add(symbol.currency, book_value, current_total);
            rows.push(PositionReport {
                symbol: symbol.ticker,
                amount: position.amount,
                average_price: position.average_price(),
                live_price: quote.price,
                book_value,
                current_total,
                pl,
                pl_percent: percent_change(pl, book_value),
                currency: symbol.currency,
            });
        }

        let summary = wallet.summarize(self.fx_service.as_ref())?;

        Ok(PortfolioReport { rows, summary })
    }
}
