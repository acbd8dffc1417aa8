//! FX (Foreign Exchange) module - currency codes, conversion traits, and a
//! rate-table backed converter.

pub mod currency;
mod fx_errors;
mod fx_service;
mod fx_traits;

pub use currency::Currency;
pub use fx_errors::FxError;
pub use fx_service::FxService;
pub use fx_traits::{ExchangeRateProviderTrait, FxServiceTrait};
