use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fx::Currency;

/// A chat-platform user known to the ledger.
///
/// Created lazily on the first buy, sell, or portfolio request. The platform
/// id is the stable key; the display name is refreshed on every
/// get-or-create so renames propagate.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub platform_user_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(platform_user_id: &str, username: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            platform_user_id: platform_user_id.to_string(),
            username: username.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A ticker symbol and its native trading currency.
///
/// Created on first reference, immutable afterwards. Tickers are stored
/// canonically upper-cased.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub id: String,
    pub ticker: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl Symbol {
    pub fn new(ticker: &str, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ticker: ticker.to_string(),
            currency,
            created_at: Utc::now(),
        }
    }
}

/// One user's holding in one symbol.
///
/// `amount` is strictly positive for every stored row: a sell that brings it
/// to zero deletes the row instead. `total_cost` is the cumulative cost
/// basis in the symbol's native currency; the average price is always
/// derived from it, never stored.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub user_id: String,
    pub symbol_id: String,
    pub amount: i64,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    pub fn new(user_id: &str, symbol_id: &str, amount: i64, total_cost: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            symbol_id: symbol_id.to_string(),
            amount,
            total_cost,
            created_at: now,
            updated_at: now,
        }
    }

    /// Blended cost per unit: `total_cost / amount`.
    pub fn average_price(&self) -> Decimal {
        if self.amount > 0 {
            self.total_cost / Decimal::from(self.amount)
        } else {
            Decimal::ZERO
        }
    }
}

/// One buy or sell request as the command layer hands it over.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub platform_user_id: String,
    pub username: String,
    pub ticker: String,
    pub amount: i64,
    /// Manual price override; the live quote is used when absent.
    pub limit_price: Option<Decimal>,
}

/// The price and currency a buy or sell executed at.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub price: Decimal,
    pub currency: Currency,
}

impl Execution {
    /// Total notional of the trade, for confirmation messages.
    pub fn total(&self, amount: i64) -> Decimal {
        self.price * Decimal::from(amount)
    }
}
