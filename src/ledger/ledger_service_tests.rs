use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use super::ledger_errors::LedgerError;
use super::ledger_model::TradeRequest;
use super::ledger_service::LedgerService;
use super::ledger_traits::{LedgerServiceTrait, PositionRepositoryTrait};
use crate::errors::{Error, Result};
use crate::fx::Currency;
use crate::market_data::{MarketDataError, Quote, QuoteServiceTrait};
use crate::store::MemoryStore;

// --- Mock QuoteService ---

struct MockQuoteService {
    quotes: HashMap<String, (Decimal, &'static str)>,
}

impl MockQuoteService {
    fn new(entries: &[(&str, Decimal, &'static str)]) -> Self {
        Self {
            quotes: entries
                .iter()
                .map(|(s, p, c)| (s.to_string(), (*p, *c)))
                .collect(),
        }
    }
}

#[async_trait]
impl QuoteServiceTrait for MockQuoteService {
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote> {
        let (price, currency) = self
            .quotes
            .get(symbol)
            .ok_or_else(|| MarketDataError::NotFound(symbol.to_string()))?;
        Ok(Quote {
            symbol: symbol.to_string(),
            price: *price,
            currency: currency.to_string(),
            as_of: Utc::now(),
        })
    }

    async fn get_latest_quotes(&self, _symbols: &[String]) -> Result<HashMap<String, Quote>> {
        unimplemented!()
    }
}

// --- Helpers ---

fn service_with(
    quotes: &[(&str, Decimal, &'static str)],
) -> (LedgerService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = LedgerService::new(store.clone(), Arc::new(MockQuoteService::new(quotes)));
    (service, store)
}

fn request(ticker: &str, amount: i64, limit_price: Option<Decimal>) -> TradeRequest {
    TradeRequest {
        platform_user_id: "user-1".to_string(),
        username: "kim".to_string(),
        ticker: ticker.to_string(),
        amount,
        limit_price,
    }
}

async fn held_position(store: &MemoryStore, user_id: &str) -> Option<super::Position> {
    let positions = store.list_positions(user_id).await.unwrap();
    positions.first().map(|(p, _)| p.clone())
}

async fn only_user_id(store: &MemoryStore) -> String {
    let (user, created) = store.get_or_create_user("user-1", "kim").await.unwrap();
    assert!(!created, "expected the user row to already exist");
    user.id
}

// --- Buy ---

#[tokio::test]
async fn buys_accumulate_a_blended_average() {
    let (service, store) = service_with(&[("AAPL", dec!(120), "USD")]);

    let execution = service
        .buy(request("AAPL", 10, Some(dec!(100))))
        .await
        .unwrap();
    assert_eq!(execution.price, dec!(100));
    assert_eq!(execution.currency, Currency::Usd);

    service
        .buy(request("AAPL", 5, Some(dec!(130))))
        .await
        .unwrap();

    let user_id = only_user_id(&store).await;
    let position = held_position(&store, &user_id).await.unwrap();
    assert_eq!(position.amount, 15);
    assert_eq!(position.total_cost, dec!(1650));
    assert_eq!(position.average_price(), dec!(110));
}

#[tokio::test]
async fn buy_uses_live_price_without_override() {
    let (service, store) = service_with(&[("AAPL", dec!(120), "USD")]);

    let execution = service.buy(request("AAPL", 4, None)).await.unwrap();
    assert_eq!(execution.price, dec!(120));
    assert_eq!(execution.total(4), dec!(480));

    let user_id = only_user_id(&store).await;
    let position = held_position(&store, &user_id).await.unwrap();
    assert_eq!(position.total_cost, dec!(480));
}

#[tokio::test]
async fn buy_canonicalizes_the_ticker() {
    let (service, store) = service_with(&[("SHOP.TO", dec!(98), "CAD")]);

    let execution = service.buy(request("shop.to", 1, None)).await.unwrap();
    assert_eq!(execution.currency, Currency::Cad);

    let user_id = only_user_id(&store).await;
    let positions = store.list_positions(&user_id).await.unwrap();
    assert_eq!(positions[0].1.ticker, "SHOP.TO");
}

#[tokio::test]
async fn buy_with_unsupported_currency_creates_no_rows() {
    let (service, store) = service_with(&[("VOD.L", dec!(70), "GBP")]);

    let err = service.buy(request("VOD.L", 3, None)).await.unwrap_err();
    match err {
        Error::Ledger(LedgerError::UnsupportedCurrency(code)) => assert_eq!(code, "GBP"),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(store.user_count(), 0);
    assert_eq!(store.symbol_count(), 0);
    assert_eq!(store.position_count(), 0);
}

#[tokio::test]
async fn buy_with_failing_quote_mutates_nothing() {
    let (service, store) = service_with(&[]);

    let err = service.buy(request("AAPL", 1, None)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::MarketData(MarketDataError::NotFound(_))
    ));
    assert_eq!(store.user_count(), 0);
    assert_eq!(store.position_count(), 0);
}

#[tokio::test]
async fn buy_rejects_non_positive_amounts() {
    let (service, _) = service_with(&[("AAPL", dec!(120), "USD")]);

    let err = service.buy(request("AAPL", 0, None)).await.unwrap_err();
    assert!(matches!(err, Error::Ledger(LedgerError::InvalidAmount(0))));
}

// --- Sell ---

#[tokio::test]
async fn selling_everything_removes_the_position() {
    let (service, store) = service_with(&[("AAPL", dec!(120), "USD")]);

    service
        .buy(request("AAPL", 10, Some(dec!(100))))
        .await
        .unwrap();
    service
        .buy(request("AAPL", 5, Some(dec!(130))))
        .await
        .unwrap();

    let execution = service.sell(request("AAPL", 15, None)).await.unwrap();
    assert_eq!(execution.price, dec!(120));
    assert_eq!(execution.currency, Currency::Usd);

    let user_id = only_user_id(&store).await;
    assert!(held_position(&store, &user_id).await.is_none());
    assert_eq!(store.position_count(), 0);
}

#[tokio::test]
async fn partial_sell_uses_the_ledger_arithmetic() {
    let (service, store) = service_with(&[("AAPL", dec!(120), "USD")]);

    service
        .buy(request("AAPL", 10, Some(dec!(100))))
        .await
        .unwrap();
    service
        .buy(request("AAPL", 5, Some(dec!(130))))
        .await
        .unwrap();

    // total 1650 across 15 shares; selling 5 at 130 leaves
    // 1650 - 130 * 10 = 350 on the remaining 10 shares.
    service
        .sell(request("AAPL", 5, Some(dec!(130))))
        .await
        .unwrap();

    let user_id = only_user_id(&store).await;
    let position = held_position(&store, &user_id).await.unwrap();
    assert_eq!(position.amount, 10);
    assert_eq!(position.total_cost, dec!(350));
}

#[tokio::test]
async fn overselling_fails_and_leaves_the_position_unchanged() {
    let (service, store) = service_with(&[("AAPL", dec!(120), "USD")]);

    service
        .buy(request("AAPL", 10, Some(dec!(100))))
        .await
        .unwrap();

    let err = service.sell(request("AAPL", 11, None)).await.unwrap_err();
    match err {
        Error::Ledger(LedgerError::InsufficientPosition { requested, held }) => {
            assert_eq!(requested, 11);
            assert_eq!(held, 10);
        }
        other => panic!("unexpected error: {other}"),
    }

    let user_id = only_user_id(&store).await;
    let position = held_position(&store, &user_id).await.unwrap();
    assert_eq!(position.amount, 10);
    assert_eq!(position.total_cost, dec!(1000));
}

#[tokio::test]
async fn selling_without_a_position_is_insufficient() {
    let (service, _) = service_with(&[("AAPL", dec!(120), "USD")]);

    let err = service.sell(request("AAPL", 1, None)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Ledger(LedgerError::InsufficientPosition { held: 0, .. })
    ));
}

#[tokio::test]
async fn sell_with_unsupported_currency_is_rejected_before_lookup() {
    let (service, store) = service_with(&[("VOD.L", dec!(70), "GBP")]);

    let err = service.sell(request("VOD.L", 1, None)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Ledger(LedgerError::UnsupportedCurrency(_))
    ));
    assert_eq!(store.symbol_count(), 0);
}
