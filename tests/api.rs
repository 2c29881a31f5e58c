use std::sync::Arc;

use arbitrage::api::rest::{create_router, ApiState};
use arbitrage::bot::quote_book::QuoteBook;
use arbitrage::observability::metrics::{register_metrics, QUOTES_RECEIVED};
use arbitrage::Quote;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

fn router_with(quotes: Vec<Quote>) -> Router {
    let book = Arc::new(QuoteBook::new());
    for quote in quotes {
        book.update(quote);
    }
    create_router(Arc::new(ApiState { book }))
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn health_check_responds_ok() {
    let (status, body) = get(router_with(vec![]), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn quotes_endpoint_lists_latest_quotes() {
    let router = router_with(vec![
        Quote::new("bittrex", "BTC-LTC", Decimal::new(812, 5), Decimal::new(815, 5), Decimal::new(813, 5)),
        Quote::new("bittrex", "BTC-ETH", Decimal::new(3, 2), Decimal::new(4, 2), Decimal::new(35, 3)),
    ]);

    let (status, body) = get(router, "/quotes").await;
    assert_eq!(status, StatusCode::OK);

    let quotes: Value = serde_json::from_str(&body).unwrap();
    let quotes = quotes.as_array().unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0]["market"], "BTC-ETH");
    assert_eq!(quotes[1]["market"], "BTC-LTC");
    assert_eq!(quotes[1]["bid"], "0.00812");
}

#[tokio::test]
async fn single_quote_lookup() {
    let router = router_with(vec![
        Quote::new("bittrex", "BTC-LTC", Decimal::ONE, Decimal::TWO, Decimal::ONE),
    ]);

    let (status, body) = get(router.clone(), "/quotes/bittrex/BTC-LTC").await;
    assert_eq!(status, StatusCode::OK);
    let quote: Quote = serde_json::from_str(&body).unwrap();
    assert_eq!(quote.ask, Decimal::TWO);

    let (status, _) = get(router, "/quotes/bittrex/BTC-NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_exposes_registry() {
    register_metrics().unwrap();
    QUOTES_RECEIVED.with_label_values(&["api-test"]).inc();

    let (status, body) = get(router_with(vec![]), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("quotes_received_total"));
}
