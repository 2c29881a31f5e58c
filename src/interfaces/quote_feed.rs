use async_trait::async_trait;
use tokio::sync::mpsc;
use crate::error::Result;
use crate::types::Quote;

/// A running producer of quotes that the bot can start and stop.
///
/// `run` blocks until the feed has stopped. `quit` requests cancellation and
/// returns only once the feed guarantees no further writes to `quotes`.
#[async_trait]
pub trait QuoteFeed: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self, quotes: mpsc::Sender<Quote>) -> Result<()>;
    async fn quit(&self) -> Result<()>;
}
