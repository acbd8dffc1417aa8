use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::RwLock;

use crate::errors::{Error, Result};
use crate::fx::Currency;
use crate::ledger::{Position, PositionRepositoryTrait, Symbol, User};

/// In-process record store.
///
/// Users and symbols live in `DashMap`s keyed by their natural keys, so
/// get-or-create is a single atomic `entry` call and the benign
/// concurrent-create race resolves to the existing row by construction.
/// Positions are kept in insertion order, which is the iteration order
/// `list_positions` reports.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    symbols: DashMap<String, Symbol>,
    positions: RwLock<Vec<Position>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn position_count(&self) -> usize {
        self.positions.read().expect("position store poisoned").len()
    }

    fn positions_read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Position>>> {
        self.positions
            .read()
            .map_err(|e| Error::Repository(format!("position store poisoned: {}", e)))
    }

    fn positions_write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Position>>> {
        self.positions
            .write()
            .map_err(|e| Error::Repository(format!("position store poisoned: {}", e)))
    }
}

#[async_trait]
impl PositionRepositoryTrait for MemoryStore {
    async fn get_or_create_user(
        &self,
        platform_user_id: &str,
        username: &str,
    ) -> Result<(User, bool)> {
        let mut created = false;
        let mut entry = self
            .users
            .entry(platform_user_id.to_string())
            .or_insert_with(|| {
                created = true;
                User::new(platform_user_id, username)
            });
        // Display-name refresh; everything else about a user is immutable.
        if !created && entry.username != username {
            entry.username = username.to_string();
        }
        Ok((entry.clone(), created))
    }

    async fn get_or_create_symbol(
        &self,
        ticker: &str,
        currency: Currency,
    ) -> Result<(Symbol, bool)> {
        let mut created = false;
        let entry = self.symbols.entry(ticker.to_string()).or_insert_with(|| {
            created = true;
            Symbol::new(ticker, currency)
        });
        Ok((entry.clone(), created))
    }

    async fn get_position(&self, user_id: &str, symbol_id: &str) -> Result<Option<Position>> {
        let positions = self.positions_read()?;
        Ok(positions
            .iter()
            .find(|p| p.user_id == user_id && p.symbol_id == symbol_id)
            .cloned())
    }

    async fn upsert_position(&self, position: Position) -> Result<Position> {
        let mut positions = self.positions_write()?;
        match positions.iter_mut().find(|p| p.id == position.id) {
            Some(existing) => *existing = position.clone(),
            None => positions.push(position.clone()),
        }
        Ok(position)
    }

    async fn delete_position(&self, position_id: &str) -> Result<()> {
        let mut positions = self.positions_write()?;
        let before = positions.len();
        positions.retain(|p| p.id != position_id);
        if positions.len() == before {
            return Err(Error::Repository(format!(
                "position {} not found",
                position_id
            )));
        }
        Ok(())
    }

    async fn list_positions(&self, user_id: &str) -> Result<Vec<(Position, Symbol)>> {
        let positions = self.positions_read()?;
        positions
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| {
                let symbol = self
                    .symbols
                    .iter()
                    .find(|s| s.id == p.symbol_id)
                    .map(|s| s.value().clone())
                    .ok_or_else(|| {
                        Error::Repository(format!("symbol {} missing for position", p.symbol_id))
                    })?;
                Ok((p.clone(), symbol))
            })
            .collect()
    }
}
