use thiserror::Error;

/// Errors from live quote lookups.
///
/// The core never retries these; they surface to the caller, which owns any
/// retry/timeout policy around the quote source.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("No quote data for symbol: {0}")]
    NotFound(String),

    #[error("Invalid quote data for {symbol}: {message}")]
    InvalidData { symbol: String, message: String },

    /// A batched fetch resolved some symbols but not all. Carries every
    /// symbol that failed so the caller can attribute the failure.
    #[error("Quotes unavailable for: {}", symbols.join(", "))]
    PartialFailure { symbols: Vec<String> },
}

impl From<yahoo_finance_api::YahooError> for MarketDataError {
    fn from(error: yahoo_finance_api::YahooError) -> Self {
        use yahoo_finance_api::YahooError;
        match error {
            YahooError::FetchFailed(e) => MarketDataError::Provider(e),
            YahooError::NoQuotes => MarketDataError::NotFound("no quotes returned".to_string()),
            YahooError::NoResult => MarketDataError::NotFound("no result returned".to_string()),
            _ => MarketDataError::Provider(error.to_string()),
        }
    }
}
