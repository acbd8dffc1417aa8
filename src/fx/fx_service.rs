use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::currency::Currency;
use super::fx_errors::FxError;
use super::fx_traits::{ExchangeRateProviderTrait, FxServiceTrait};
use crate::errors::Result;

/// Currency converter over a pluggable rate provider.
///
/// Falls back to the inverse pair when only the opposite direction is
/// quoted. A zero or negative stored rate is treated as invalid rather than
/// propagated into conversions.
pub struct FxService {
    provider: Arc<dyn ExchangeRateProviderTrait>,
}

impl FxService {
    pub fn new(provider: Arc<dyn ExchangeRateProviderTrait>) -> Self {
        Self { provider }
    }

    fn resolve_rate(&self, from: Currency, to: Currency) -> std::result::Result<Decimal, FxError> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        if let Some(rate) = self.provider.latest_rate(from, to)? {
            validate_rate(rate, from, to)?;
            return Ok(rate);
        }

        // Inverse fallback: a USD->CAD table entry also answers CAD->USD.
        if let Some(rate) = self.provider.latest_rate(to, from)? {
            validate_rate(rate, to, from)?;
            debug!("Using inverse rate for {}->{}", from, to);
            return Ok(Decimal::ONE / rate);
        }

        Err(FxError::RateUnavailable(from, to))
    }
}

fn validate_rate(
    rate: Decimal,
    from: Currency,
    to: Currency,
) -> std::result::Result<(), FxError> {
    if rate <= Decimal::ZERO {
        return Err(FxError::InvalidRate {
            from,
            to,
            rate: rate.to_string(),
        });
    }
    Ok(())
}

impl FxServiceTrait for FxService {
    fn get_latest_rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
        Ok(self.resolve_rate(from, to)?)
    }

    fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Decimal> {
        let rate = self.resolve_rate(from, to)?;
        Ok(amount * rate)
    }
}
