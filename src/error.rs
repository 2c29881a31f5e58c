use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Quote Source Errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Response decoding failed: {0}")]
    Decode(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Empty result")]
    EmptyResult,

    #[error("Call timed out after {0:?}")]
    Timeout(Duration),

    // Lifecycle Errors
    #[error("Feed already running: {0}")]
    AlreadyRunning(String),

    #[error("Quit already requested")]
    AlreadyQuit,

    #[error("Feed state channel closed: {0}")]
    FeedClosed(String),

    #[error("Shutdown of feed {feed} timed out after {after:?}")]
    ShutdownTimeout {
        feed: String,
        after: Duration,
    },

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Tracing subscriber error: {0}")]
    TracingError(String),

    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Stable label for metrics and log filtering.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport(_) => "transport",
            Error::Decode(_) => "decode",
            Error::Source(_) => "source",
            Error::EmptyResult => "empty_result",
            Error::Timeout(_) => "timeout",
            Error::AlreadyRunning(_) | Error::AlreadyQuit | Error::FeedClosed(_) => "lifecycle",
            Error::ShutdownTimeout { .. } => "shutdown_timeout",
            Error::ConfigError(_) => "config",
            Error::TracingError(_) => "tracing",
            Error::MetricsError(_) => "metrics",
            Error::IoError(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
