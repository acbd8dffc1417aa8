//! Yahoo Finance quote provider.
//!
//! Fetches the latest trade price for equities (e.g. AAPL, SHOP.TO) through
//! the Yahoo Finance chart API. The native currency comes from the chart
//! metadata; when Yahoo omits it, the TSX-style exchange suffix of the
//! ticker decides between CAD and USD.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use log::warn;
use rust_decimal::Decimal;
use yahoo_finance_api as yahoo;

use super::super::market_data_errors::MarketDataError;
use super::super::market_data_model::Quote;
use super::super::market_data_traits::MarketDataProvider;

/// Ticker suffixes of Canadian exchanges (TSX, TSX-V, NEO).
const CAD_SUFFIXES: [&str; 3] = [".TO", ".V", ".NE"];

pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::Provider(format!("Failed to initialize Yahoo connector: {}", e))
        })?;
        Ok(Self { connector })
    }
}

/// Currency fallback for tickers whose metadata carries no currency.
fn currency_from_suffix(symbol: &str) -> &'static str {
    let upper = symbol.to_ascii_uppercase();
    if CAD_SUFFIXES.iter().any(|suffix| upper.ends_with(suffix)) {
        "CAD"
    } else {
        "USD"
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::NotFound(symbol.to_string())
                } else {
                    MarketDataError::Provider(e.to_string())
                }
            })?;

        let yahoo_quote = response
            .last_quote()
            .map_err(|_| MarketDataError::NotFound(symbol.to_string()))?;

        let price = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::InvalidData {
                symbol: symbol.to_string(),
                message: format!("close price {} is not a valid decimal", yahoo_quote.close),
            }
        })?;

        let currency = match response.metadata() {
            Ok(meta) => meta
                .currency
                .unwrap_or_else(|| currency_from_suffix(symbol).to_string()),
            Err(e) => {
                warn!("No chart metadata for {}: {}", symbol, e);
                currency_from_suffix(symbol).to_string()
            }
        };

        let as_of = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            currency,
            as_of,
        })
    }
}
