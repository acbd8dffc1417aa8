use thiserror::Error;

use super::currency::Currency;

/// Errors from currency conversion.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("No exchange rate available for {0}->{1}")]
    RateUnavailable(Currency, Currency),

    #[error("Invalid exchange rate for {from}->{to}: {rate}")]
    InvalidRate {
        from: Currency,
        to: Currency,
        rate: String,
    },

    #[error("Exchange rate provider failed: {0}")]
    Provider(String),
}
