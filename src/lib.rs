//! Stockbot Core - position ledger and portfolio reporting.
//!
//! This crate contains the core business logic for the paper-trading bot:
//! recording buy/sell events per user and ticker, maintaining a blended
//! average cost basis, and producing multi-currency profit/loss reports.
//! It is storage-agnostic and presentation-agnostic: the record store, the
//! quote source, and the currency converter are traits implemented by
//! adapters, and the report models are plain data a chat layer can render.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod ledger;
pub mod market_data;
pub mod portfolio;
pub mod store;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
