//! Supported trading currencies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency the ledger supports as a symbol's native trading currency.
///
/// Quote providers report currency as a free-form code; anything that does
/// not parse into this enum is rejected by the ledger before any row is
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Cad,
}

impl Currency {
    /// Parses an ISO 4217 code, case-insensitively. Returns `None` for any
    /// currency outside the supported set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "CAD" => Some(Currency::Cad),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
        }
    }

    /// The other supported currency. Cross-currency totals convert each
    /// currency's counterpart into it.
    pub fn counterpart(&self) -> Self {
        match self {
            Currency::Usd => Currency::Cad,
            Currency::Cad => Currency::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
