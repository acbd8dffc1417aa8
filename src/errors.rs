//! Core error types.
//!
//! Each domain module defines its own error enum; this module aggregates
//! them into a single root `Error` so callers get one distinguishable error
//! kind per failure case. Storage-specific errors are carried in string form
//! to keep this type backend-agnostic.

use thiserror::Error;

use crate::fx::FxError;
use crate::ledger::LedgerError;
use crate::market_data::MarketDataError;
use crate::portfolio::PortfolioError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the position ledger.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Currency conversion failed: {0}")]
    Fx(#[from] FxError),

    #[error("Portfolio report failed: {0}")]
    Portfolio(#[from] PortfolioError),

    /// Record-store failure, reported by whatever adapter backs the
    /// repository traits.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
