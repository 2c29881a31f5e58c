use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::config::poller::PollerConfig;
use crate::error::{Error, Result};

pub const BITTREX_API_HOST: &str = "https://bittrex.com/api/v1.1";

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    Bittrex(BittrexConfig),
}

impl SourceConfig {
    pub fn name(&self) -> &str {
        match self {
            SourceConfig::Bittrex(config) => &config.name,
        }
    }

    pub fn poller(&self) -> &PollerConfig {
        match self {
            SourceConfig::Bittrex(config) => &config.poller,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.poller().validate()?;
        match self {
            SourceConfig::Bittrex(config) => config.validate(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct BittrexConfig {
    pub name: String,
    pub host: String,
    /// HTTP timeout for one request. Falls back to `poller.call_timeout_ms`;
    /// the poller's timeout bounds every call regardless.
    pub request_timeout_ms: Option<u64>,
    pub poller: PollerConfig,
}

impl BittrexConfig {
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.poller.call_timeout())
    }

    pub fn validate(&self) -> Result<()> {
        match self.request_timeout_ms {
            Some(0) => Err(Error::ConfigError("request_timeout_ms must be positive".to_string())),
            Some(ms) if ms > self.poller.call_timeout_ms => Err(Error::ConfigError(format!(
                "request_timeout_ms ({}) exceeds poller.call_timeout_ms ({})",
                ms, self.poller.call_timeout_ms
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for BittrexConfig {
    fn default() -> Self {
        BittrexConfig {
            name: "bittrex".to_string(),
            host: BITTREX_API_HOST.to_string(),
            request_timeout_ms: None,
            poller: PollerConfig::default(),
        }
    }
}
