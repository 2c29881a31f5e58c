use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_INTERVAL_MS: u64 = 250;
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 3_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Quote requests launched together before pacing.
    pub batch_size: usize,
    /// Delay between successive batches.
    pub batch_interval_ms: u64,
    /// When set, wait this long after a full sweep before listing markets again.
    pub refresh_interval_ms: Option<u64>,
    /// Upper bound on a single source call.
    pub call_timeout_ms: u64,
}

impl PollerConfig {
    pub fn batch_interval(&self) -> Duration {
        Duration::from_millis(self.batch_interval_ms)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_ms.map(Duration::from_millis)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::ConfigError("batch_size must be at least 1".to_string()));
        }
        if self.batch_interval_ms == 0 {
            return Err(Error::ConfigError("batch_interval_ms must be positive".to_string()));
        }
        if self.call_timeout_ms == 0 {
            return Err(Error::ConfigError("call_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        PollerConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_interval_ms: DEFAULT_BATCH_INTERVAL_MS,
            refresh_interval_ms: None,
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PollerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_interval(), Duration::from_millis(250));
        assert_eq!(config.refresh_interval(), None);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let config = PollerConfig { batch_size: 0, ..PollerConfig::default() };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = PollerConfig { batch_interval_ms: 0, ..PollerConfig::default() };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
