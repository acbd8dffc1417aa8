use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A live quote for one ticker symbol.
///
/// The currency is carried as the provider's raw code; the ledger decides
/// whether it is supported. Providers that cannot report a currency infer
/// one from the ticker's exchange suffix.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub currency: String,
    pub as_of: DateTime<Utc>,
}
