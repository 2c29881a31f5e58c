use tracing::Span;
use tracing_subscriber::EnvFilter;
use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, Result};

/// Installs the global subscriber. `RUST_LOG` takes precedence over `config.filter`.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| Error::ConfigError(format!("invalid log filter: {}", e)))?;

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    };

    installed.map_err(|e| Error::TracingError(format!("could not install global subscriber: {}", e)))
}

pub fn poller_span(source: &str) -> Span {
    tracing::info_span!(
        "poller",
        source = %source,
    )
}

pub fn fetch_span(source: &str, market: &str) -> Span {
    tracing::debug_span!(
        "fetch_quote",
        source = %source,
        market = %market,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_reports_tracing_error() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);

        assert!(matches!(init_tracing(&config), Err(Error::TracingError(_))));
    }
}
