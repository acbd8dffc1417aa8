use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::portfolio_errors::PortfolioError;
use super::portfolio_model::percent_change;
use crate::errors::Result;
use crate::fx::{Currency, FxServiceTrait};

/// Accumulates book and live value per currency across positions, then
/// produces per-currency and converted cross-currency summaries.
#[derive(Debug, Default, Clone)]
pub struct CurrencyWallet {
    usd: Bucket,
    cad: Bucket,
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    book: Decimal,
    live: Decimal,
}

/// One summary line: a single currency, or a converted grand total.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    pub label: String,
    pub book_value: Decimal,
    pub live_value: Decimal,
    pub pl: Decimal,
    pub pl_percent: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub entries: Vec<WalletEntry>,
}

impl CurrencyWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, currency: Currency, book_value: Decimal, live_value: Decimal) {
        let bucket = self.bucket_mut(currency);
        bucket.book += book_value;
        bucket.live += live_value;
    }

    fn bucket(&self, currency: Currency) -> Bucket {
        match currency {
            Currency::Usd => self.usd,
            Currency::Cad => self.cad,
        }
    }

    fn bucket_mut(&mut self, currency: Currency) -> &mut Bucket {
        match currency {
            Currency::Usd => &mut self.usd,
            Currency::Cad => &mut self.cad,
        }
    }

    /// Builds the summary lines.
    ///
    /// A currency appears only when its accumulated book value is nonzero
    /// (which is also what keeps the percentage division safe). The two
    /// "Total in ..." lines are always present and fold in the counterpart
    /// currency via `fx`; a failed conversion aborts the whole summary.
    pub fn summarize(&self, fx: &dyn FxServiceTrait) -> Result<WalletSummary> {
        if self.usd.book.is_zero() && self.cad.book.is_zero() {
            return Err(PortfolioError::NoPositions.into());
        }

        let mut entries = Vec::with_capacity(4);

        for currency in [Currency::Usd, Currency::Cad] {
            let bucket = self.bucket(currency);
            if bucket.book.is_zero() {
                continue;
            }
            let pl = bucket.live - bucket.book;
            entries.push(WalletEntry {
                label: currency.as_str().to_string(),
                book_value: bucket.book,
                live_value: bucket.live,
                pl,
                pl_percent: percent_change(pl, bucket.book),
            });
        }

        for target in [Currency::Usd, Currency::Cad] {
            let own = self.bucket(target);
            let other = self.bucket(target.counterpart());
            let book = own.book + fx.convert(other.book, target.counterpart(), target)?;
            let live = own.live + fx.convert(other.live, target.counterpart(), target)?;
            let pl = live - book;
            entries.push(WalletEntry {
                label: format!("Total in {}", target),
                book_value: book,
                live_value: live,
                pl,
                pl_percent: percent_change(pl, book),
            });
        }

        Ok(WalletSummary { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::fx::FxError;
    use rust_decimal_macros::dec;

    /// Converter with a fixed USD->CAD rate.
    struct FixedFx {
        usd_to_cad: Decimal,
    }

    impl FxServiceTrait for FixedFx {
        fn get_latest_rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
            Ok(match (from, to) {
                (Currency::Usd, Currency::Cad) => self.usd_to_cad,
                (Currency::Cad, Currency::Usd) => Decimal::ONE / self.usd_to_cad,
                _ => Decimal::ONE,
            })
        }

        fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Decimal> {
            Ok(amount * self.get_latest_rate(from, to)?)
        }
    }

    struct FailingFx;

    impl FxServiceTrait for FailingFx {
        fn get_latest_rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
            Err(FxError::RateUnavailable(from, to).into())
        }

        fn convert(&self, _amount: Decimal, from: Currency, to: Currency) -> Result<Decimal> {
            Err(FxError::RateUnavailable(from, to).into())
        }
    }

    #[test]
    fn empty_wallet_has_no_positions() {
        let wallet = CurrencyWallet::new();
        let err = wallet.summarize(&FixedFx { usd_to_cad: dec!(1.25) }).unwrap_err();
        assert!(matches!(
            err,
            Error::Portfolio(PortfolioError::NoPositions)
        ));
    }

    #[test]
    fn usd_only_wallet_omits_cad_but_keeps_both_totals() {
        let mut wallet = CurrencyWallet::new();
        wallet.add(Currency::Usd, dec!(1000), dec!(1100));

        let summary = wallet.summarize(&FixedFx { usd_to_cad: dec!(1.25) }).unwrap();
        let labels: Vec<&str> = summary.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["USD", "Total in USD", "Total in CAD"]);

        let usd = &summary.entries[0];
        assert_eq!(usd.pl, dec!(100));
        assert_eq!(usd.pl_percent, dec!(10));

        let in_cad = &summary.entries[2];
        assert_eq!(in_cad.book_value, dec!(1250));
        assert_eq!(in_cad.live_value, dec!(1375.00));
    }

    #[test]
    fn mixed_wallet_sums_converted_totals() {
        let mut wallet = CurrencyWallet::new();
        wallet.add(Currency::Usd, dec!(1000), dec!(1200));
        wallet.add(Currency::Cad, dec!(500), dec!(400));

        let summary = wallet.summarize(&FixedFx { usd_to_cad: dec!(2) }).unwrap();
        let labels: Vec<&str> = summary.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["USD", "CAD", "Total in USD", "Total in CAD"]
        );

        // Total in USD: 1000 + 500/2 book, 1200 + 400/2 live.
        let in_usd = &summary.entries[2];
        assert_eq!(in_usd.book_value, dec!(1250));
        assert_eq!(in_usd.live_value, dec!(1400));
        assert_eq!(in_usd.pl, dec!(150));

        // Total in CAD: 1000*2 + 500 book, 1200*2 + 400 live.
        let in_cad = &summary.entries[3];
        assert_eq!(in_cad.book_value, dec!(2500));
        assert_eq!(in_cad.live_value, dec!(2800));
    }

    #[test]
    fn accumulation_folds_multiple_positions() {
        let mut wallet = CurrencyWallet::new();
        wallet.add(Currency::Cad, dec!(100), dec!(90));
        wallet.add(Currency::Cad, dec!(200), dec!(260));

        let summary = wallet.summarize(&FixedFx { usd_to_cad: dec!(1.25) }).unwrap();
        let cad = summary
            .entries
            .iter()
            .find(|e| e.label == "CAD")
            .unwrap();
        assert_eq!(cad.book_value, dec!(300));
        assert_eq!(cad.live_value, dec!(350));
        assert_eq!(cad.pl, dec!(50));
    }

    #[test]
    fn conversion_failure_aborts_the_summary() {
        let mut wallet = CurrencyWallet::new();
        wallet.add(Currency::Usd, dec!(1000), dec!(1100));

        let err = wallet.summarize(&FailingFx).unwrap_err();
        assert!(matches!(err, Error::Fx(FxError::RateUnavailable(_, _))));
    }
}
