use async_trait::async_trait;
use std::collections::HashMap;

use super::market_data_errors::MarketDataError;
use super::market_data_model::Quote;
use crate::errors::Result;

/// A single market data source (Yahoo, a fixture, a cache...).
///
/// Implementations fetch one symbol at a time; batching and error
/// attribution live in the service layer on top.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Stable identifier used in logs.
    fn id(&self) -> &'static str;

    async fn get_latest_quote(
        &self,
        symbol: &str,
    ) -> std::result::Result<Quote, MarketDataError>;
}

/// Trait defining the contract for quote lookups as the ledger and the
/// portfolio aggregator consume them.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote>;

    /// Batched lookup for distinct symbols. Either every symbol resolves, or
    /// the whole call fails with [`MarketDataError::PartialFailure`] naming
    /// each symbol that did not.
    async fn get_latest_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>>;
}
