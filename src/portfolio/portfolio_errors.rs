use thiserror::Error;

/// Errors from portfolio aggregation.
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// The user holds nothing, so there is no report to build.
    #[error("No positions found for this user")]
    NoPositions,
}
