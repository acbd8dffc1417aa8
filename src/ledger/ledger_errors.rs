use thiserror::Error;

/// Errors from buy/sell operations.
///
/// All of these are permanent: retrying the same request cannot succeed
/// without the inputs changing.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Trade amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("Currency '{0}' is not supported; only USD and CAD listings are tracked")]
    UnsupportedCurrency(String),

    #[error("Insufficient position: tried to sell {requested}, holding {held}")]
    InsufficientPosition { requested: i64, held: i64 },
}
