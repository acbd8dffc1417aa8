use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ledger_errors::LedgerError;
use super::ledger_model::{Execution, Position, TradeRequest};
use super::ledger_traits::{LedgerServiceTrait, PositionRepositoryTrait};
use crate::errors::Result;
use crate::fx::Currency;
use crate::market_data::QuoteServiceTrait;

/// Applies one buy or sell to exactly one position.
///
/// The quote is resolved and the currency validated before any row is
/// touched, and the position write is the last action, so every failure
/// path leaves the store unchanged. The caller serializes mutations per
/// user; the service holds no locks of its own.
pub struct LedgerService {
    repository: Arc<dyn PositionRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl LedgerService {
    pub fn new(
        repository: Arc<dyn PositionRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            repository,
            quote_service,
        }
    }

    /// Resolves the execution price and native currency for a request.
    ///
    /// The live quote is fetched even under a manual price override: it is
    /// the authority on the symbol's native currency.
    async fn resolve_execution(&self, request: &TradeRequest) -> Result<(String, Execution)> {
        if request.amount <= 0 {
            return Err(LedgerError::InvalidAmount(request.amount).into());
        }

        let ticker = request.ticker.trim().to_uppercase();
        let quote = self.quote_service.get_latest_quote(&ticker).await?;
        let currency = Currency::from_code(&quote.currency)
            .ok_or_else(|| LedgerError::UnsupportedCurrency(quote.currency.clone()))?;
        let price = request.limit_price.unwrap_or(quote.price);

        Ok((ticker, Execution { price, currency }))
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn buy(&self, request: TradeRequest) -> Result<Execution> {
        let (ticker, execution) = self.resolve_execution(&request).await?;

        let (symbol, _) = self
            .repository
            .get_or_create_symbol(&ticker, execution.currency)
            .await?;
        let (user, _) = self
            .repository
            .get_or_create_user(&request.platform_user_id, &request.username)
            .await?;

        let cost = execution.price * Decimal::from(request.amount);
        let position = match self.repository.get_position(&user.id, &symbol.id).await? {
            Some(mut existing) => {
                existing.total_cost += cost;
                existing.amount += request.amount;
                existing.updated_at = chrono::Utc::now();
                existing
            }
            None => Position::new(&user.id, &symbol.id, request.amount, cost),
        };

        debug!(
            "Buy {} x {} @ {} {} for {}: amount {}, total cost {}",
            ticker,
            request.amount,
            execution.price,
            execution.currency,
            user.username,
            position.amount,
            position.total_cost
        );
        self.repository.upsert_position(position).await?;

        Ok(execution)
    }

    async fn sell(&self, request: TradeRequest) -> Result<Execution> {
        let (ticker, execution) = self.resolve_execution(&request).await?;

        let (symbol, _) = self
            .repository
            .get_or_create_symbol(&ticker, execution.currency)
            .await?;
        let (user, _) = self
            .repository
            .get_or_create_user(&request.platform_user_id, &request.username)
            .await?;

        let mut position = self
            .repository
            .get_position(&user.id, &symbol.id)
            .await?
            .ok_or(LedgerError::InsufficientPosition {
                requested: request.amount,
                held: 0,
            })?;

        if position.amount < request.amount {
            return Err(LedgerError::InsufficientPosition {
                requested: request.amount,
                held: position.amount,
            }
            .into());
        }

        if position.amount == request.amount {
            // Full liquidation: the row is deleted, never kept at zero.
            debug!("Sell closes {} position for {}", ticker, user.username);
            self.repository.delete_position(&position.id).await?;
            return Ok(execution);
        }

        // Partial sell: new_total = old_total - price * remaining, so the
        // realized P/L on the sold lot is old_total - new_total.
        let remaining = position.amount - request.amount;
        position.total_cost -= execution.price * Decimal::from(remaining);
        position.amount = remaining;
        position.updated_at = chrono::Utc::now();

        debug!(
            "Sell {} x {} @ {} {} for {}: {} remaining, total cost {}",
            ticker,
            request.amount,
            execution.price,
            execution.currency,
            user.username,
            position.amount,
            position.total_cost
        );
        self.repository.upsert_position(position).await?;

        Ok(execution)
    }
}
