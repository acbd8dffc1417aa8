use rust_decimal::Decimal;

use super::currency::Currency;
use super::fx_errors::FxError;
use crate::errors::Result;

/// Trait defining the contract for currency conversion.
///
/// Conversion is synchronous from the ledger's point of view: callers that
/// need fresh rates refresh the underlying provider out of band. A failed
/// conversion surfaces as an error rather than silently omitting a currency
/// from a summary.
pub trait FxServiceTrait: Send + Sync {
    /// Latest available rate for one unit of `from` expressed in `to`.
    fn get_latest_rate(&self, from: Currency, to: Currency) -> Result<Decimal>;

    /// Converts `amount` from `from` to `to` at the latest available rate.
    fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Decimal>;
}

/// Source of exchange rates backing an [`FxServiceTrait`] implementation.
///
/// Returns `Ok(None)` when no rate is known for the pair; the service then
/// tries the inverse pair before giving up.
pub trait ExchangeRateProviderTrait: Send + Sync {
    fn latest_rate(
        &self,
        from: Currency,
        to: Currency,
    ) -> std::result::Result<Option<Decimal>, FxError>;
}
