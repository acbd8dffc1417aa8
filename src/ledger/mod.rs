//! Position ledger module - users, symbols, positions, and the buy/sell
//! service that maintains the blended average cost basis.

mod ledger_errors;
mod ledger_model;
mod ledger_service;
mod ledger_traits;

#[cfg(test)]
mod ledger_service_tests;

pub use ledger_errors::LedgerError;
pub use ledger_model::{Execution, Position, Symbol, TradeRequest, User};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerServiceTrait, PositionRepositoryTrait};
