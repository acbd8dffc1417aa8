use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::market_data_errors::MarketDataError;
use super::market_data_model::Quote;
use super::market_data_traits::{MarketDataProvider, QuoteServiceTrait};
use crate::errors::Result;

/// Quote service over a single provider.
///
/// Adds the batched group-quote capability on top of the provider's
/// one-symbol fetch: symbols are fetched concurrently, successes are
/// collected, and any failure fails the whole batch with per-symbol
/// attribution.
pub struct MarketDataService {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl QuoteServiceTrait for MarketDataService {
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote> {
        let quote = self.provider.get_latest_quote(symbol).await?;
        debug!(
            "Quote from {}: {} @ {} {}",
            self.provider.id(),
            quote.symbol,
            quote.price,
            quote.currency
        );
        Ok(quote)
    }

    async fn get_latest_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>> {
        let fetches = symbols
            .iter()
            .map(|symbol| async move {
                let result = self.provider.get_latest_quote(symbol).await;
                (symbol.clone(), result)
            })
            .collect::<Vec<_>>();

        let mut quotes = HashMap::with_capacity(symbols.len());
        let mut failed: Vec<String> = Vec::new();

        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(quote) => {
                    quotes.insert(symbol, quote);
                }
                Err(e) => {
                    warn!("Quote fetch failed for {}: {}", symbol, e);
                    failed.push(symbol);
                }
            }
        }

        if !failed.is_empty() {
            return Err(MarketDataError::PartialFailure { symbols: failed }.into());
        }

        Ok(quotes)
    }
}
