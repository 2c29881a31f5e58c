#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arbitrage::interfaces::QuoteSource;
use arbitrage::{Error, Market, Quote, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::time::{sleep, Instant};

/// Scripted quote source that records every call it receives.
pub struct FakeSource {
    name: String,
    markets: Vec<String>,
    delay: Duration,
    empty: HashSet<String>,
    listing_failures: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    listing_calls: Mutex<Vec<Instant>>,
    quote_calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeSource {
    pub fn new(name: &str, markets: &[&str]) -> Self {
        FakeSource {
            name: name.to_string(),
            markets: markets.iter().map(|m| m.to_string()).collect(),
            delay: Duration::ZERO,
            empty: HashSet::new(),
            listing_failures: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            listing_calls: Mutex::new(Vec::new()),
            quote_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_empty_results(mut self, markets: &[&str]) -> Self {
        self.empty = markets.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn failing_listings(self, count: usize) -> Self {
        self.listing_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn listing_calls(&self) -> Vec<Instant> {
        self.listing_calls.lock().unwrap().clone()
    }

    pub fn quote_calls(&self) -> Vec<(String, Instant)> {
        self.quote_calls.lock().unwrap().clone()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for FakeSource {
    async fn fetch_markets(&self) -> Result<Vec<Market>> {
        self.listing_calls.lock().unwrap().push(Instant::now());

        let failing = self.listing_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Error::Transport("connection refused".to_string()));
        }

        Ok(self.markets.iter().map(|m| Market::new(m.as_str())).collect())
    }

    async fn fetch_quote(&self, market: &str) -> Result<Option<Quote>> {
        if market.trim().is_empty() {
            return Ok(None);
        }

        self.quote_calls.lock().unwrap().push((market.to_string(), Instant::now()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.empty.contains(market) {
            return Err(Error::EmptyResult);
        }

        Ok(Some(Quote::new(
            self.name.as_str(),
            market,
            Decimal::new(15, 1),
            Decimal::new(16, 1),
            Decimal::new(155, 2),
        )))
    }
}

/// Yields to the runtime until `condition` holds, advancing paused time in small steps.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached");
}
