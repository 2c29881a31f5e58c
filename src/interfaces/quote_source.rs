use async_trait::async_trait;
use crate::error::Result;
use crate::types::{Market, Quote};

/// A remote market-data provider. Calls are single-shot and idempotent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_markets(&self) -> Result<Vec<Market>>;

    /// `Ok(None)` means the market was skipped (blank or sentinel name).
    async fn fetch_quote(&self, market: &str) -> Result<Option<Quote>>;
}
