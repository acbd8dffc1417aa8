use async_trait::async_trait;

use super::ledger_model::{Execution, Position, Symbol, TradeRequest, User};
use crate::errors::Result;
use crate::fx::Currency;

/// Trait defining the record-store contract for ledger rows.
///
/// The get-or-create operations must tolerate the benign race where two
/// callers create the same row at once: on a uniqueness conflict the
/// implementation re-reads and returns the existing row. The returned flag
/// is `true` when this call created the row.
#[async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    async fn get_or_create_user(
        &self,
        platform_user_id: &str,
        username: &str,
    ) -> Result<(User, bool)>;

    async fn get_or_create_symbol(&self, ticker: &str, currency: Currency)
        -> Result<(Symbol, bool)>;

    async fn get_position(&self, user_id: &str, symbol_id: &str) -> Result<Option<Position>>;

    /// Inserts the row if its id is new, replaces it otherwise. Either the
    /// whole row lands or the store reports an error and keeps the old one.
    async fn upsert_position(&self, position: Position) -> Result<Position>;

    async fn delete_position(&self, position_id: &str) -> Result<()>;

    /// All positions held by one user, joined with their symbols, in the
    /// store's iteration order.
    async fn list_positions(&self, user_id: &str) -> Result<Vec<(Position, Symbol)>>;
}

/// Trait defining the contract for the buy/sell ledger.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    async fn buy(&self, request: TradeRequest) -> Result<Execution>;
    async fn sell(&self, request: TradeRequest) -> Result<Execution>;
}
