//! Portfolio module - the per-user report aggregator and the currency
//! wallet that folds positions into per-currency and cross-currency totals.

mod currency_wallet;
mod portfolio_errors;
mod portfolio_model;
mod portfolio_service;


pub use currency_wallet::{CurrencyWallet, WalletEntry, WalletSummary};
pub use portfolio_errors::PortfolioError;
pub use portfolio_model::{PortfolioReport, PositionReport};
pub use portfolio_service::{PortfolioService, PortfolioServiceTrait};
