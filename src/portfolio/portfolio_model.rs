use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::currency_wallet::WalletSummary;
use crate::constants::{DISPLAY_DECIMALS, PORTFOLIO_PAGE_SIZE};
use crate::fx::Currency;

/// One report row: a position valued at the live price.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionReport {
    pub symbol: String,
    pub amount: i64,
    pub average_price: Decimal,
    pub live_price: Decimal,
    /// Cumulative cost basis of the held amount.
    pub book_value: Decimal,
    /// Live market value of the held amount.
    pub current_total: Decimal,
    pub pl: Decimal,
    pub pl_percent: Decimal,
    pub currency: Currency,
}

impl PositionReport {
    /// Ticker prefixed with `+` when the live price is above the average,
    /// `-` when below, bare when equal.
    pub fn symbol_label(&self) -> String {
        match self.live_price.cmp(&self.average_price) {
            Ordering::Greater => format!("+{}", self.symbol),
            Ordering::Less => format!("-{}", self.symbol),
            Ordering::Equal => self.symbol.clone(),
        }
    }

    pub fn pl_label(&self) -> String {
        signed_label(self.pl)
    }

    pub fn pl_percent_label(&self) -> String {
        format!("{}%", signed_label(self.pl_percent))
    }
}

/// The full per-symbol report plus the wallet summary.
///
/// Rows keep the record store's iteration order so a formatter can chunk or
/// stream them without re-querying.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub rows: Vec<PositionReport>,
    pub summary: WalletSummary,
}

impl PortfolioReport {
    /// Rows chunked for flat-table rendering.
    pub fn pages(&self) -> std::slice::Chunks<'_, PositionReport> {
        self.rows.chunks(PORTFOLIO_PAGE_SIZE)
    }
}

/// `pl / book * 100`, with a zero book reported as a zero percentage rather
/// than a division error.
pub(crate) fn percent_change(pl: Decimal, book_value: Decimal) -> Decimal {
    if book_value.is_zero() {
        Decimal::ZERO
    } else {
        pl / book_value * Decimal::ONE_HUNDRED
    }
}

/// Two-decimal display string, `+`-prefixed only when strictly positive.
fn signed_label(value: Decimal) -> String {
    let prefix = if value > Decimal::ZERO { "+" } else { "" };
    format!(
        "{}{:.prec$}",
        prefix,
        value,
        prec = DISPLAY_DECIMALS as usize
    )
}
