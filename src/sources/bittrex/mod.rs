//! Bittrex public REST API, see: https://bittrex.com/home/api

pub mod api;
pub mod types;

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::config::source::BittrexConfig;
use crate::error::{Error, Result};
use crate::interfaces::QuoteSource;
use crate::types::{Market, Quote};

pub struct BittrexSource {
    config: BittrexConfig,
    client: Client,
}

impl BittrexSource {
    pub fn new(config: BittrexConfig) -> Result<Self> {
        let timeout = config.request_timeout();
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        tracing::info!(
            source = %config.name,
            host = %config.host,
            timeout_ms = timeout.as_millis() as u64,
            "Bittrex source configured"
        );

        Ok(BittrexSource { config, client })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn host(&self) -> &str {
        self.config.host.trim_end_matches('/')
    }
}

#[async_trait]
impl QuoteSource for BittrexSource {
    async fn fetch_markets(&self) -> Result<Vec<Market>> {
        let summaries = self.get_markets().await?;
        Ok(summaries.into_iter().map(Market::from).collect())
    }

    async fn fetch_quote(&self, market: &str) -> Result<Option<Quote>> {
        if market.trim().is_empty() {
            return Ok(None);
        }

        let ticker = self.get_ticker(market).await?;

        Ok(Some(Quote::new(
            self.name(),
            market,
            ticker.bid,
            ticker.ask,
            ticker.last,
        )))
    }
}
