pub mod quote_book;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use dashmap::DashSet;
use futures::future::join_all;
use tokio::sync::{broadcast, mpsc};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use crate::bot::quote_book::QuoteBook;
use crate::config::BotConfig;
use crate::config::loader::AppConfig;
use crate::config::source::SourceConfig;
use crate::error::{Error, Result};
use crate::interfaces::QuoteFeed;
use crate::observability::metrics::QUOTES_RECEIVED;
use crate::poller::BatchedPoller;
use crate::sources::BittrexSource;
use crate::types::Quote;
use crate::utils::task_supervisor::TaskSupervisor;

const SUBSCRIBER_CAPACITY: usize = 1024;

/// Runs every registered feed and merges their quotes into one stream.
pub struct Bot {
    feeds: Vec<Arc<dyn QuoteFeed>>,
    config: BotConfig,
    book: Arc<QuoteBook>,
    subscribers: broadcast::Sender<Quote>,
    quitting: AtomicBool,
    /// Feeds that did not acknowledge quit within the grace period.
    stalled: DashSet<String>,
    stopped: CancellationToken,
}

impl Bot {
    pub fn new(feeds: Vec<Arc<dyn QuoteFeed>>, config: BotConfig) -> Self {
        let (subscribers, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        Bot {
            feeds,
            config,
            book: Arc::new(QuoteBook::new()),
            subscribers,
            quitting: AtomicBool::new(false),
            stalled: DashSet::new(),
            stopped: CancellationToken::new(),
        }
    }

    /// Builds one batched poller per configured source.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut feeds: Vec<Arc<dyn QuoteFeed>> = Vec::with_capacity(config.sources.len());

        for source in &config.sources {
            match source {
                SourceConfig::Bittrex(bittrex) => {
                    let adapter = BittrexSource::new(bittrex.clone())?;
                    feeds.push(Arc::new(BatchedPoller::new(
                        bittrex.name.clone(),
                        Arc::new(adapter),
                        bittrex.poller.clone(),
                    )));
                }
            }
        }

        Ok(Bot::new(feeds, config.bot.clone()))
    }

    pub fn book(&self) -> Arc<QuoteBook> {
        Arc::clone(&self.book)
    }

    /// Every quote observed after this call, in arrival order.
    pub fn subscribe(&self) -> broadcast::Receiver<Quote> {
        self.subscribers.subscribe()
    }

    /// Runs all feeds and blocks until [`Bot::quit`] has stopped them.
    pub async fn run(&self) -> Result<()> {
        if self.quitting.load(Ordering::SeqCst) {
            return Err(Error::AlreadyQuit);
        }

        let (tx, mut rx) = mpsc::channel(self.config.channel_capacity);
        let mut supervisor = TaskSupervisor::new();

        for feed in &self.feeds {
            let feed = Arc::clone(feed);
            let quotes = tx.clone();
            supervisor.spawn(feed.name().to_string(), async move {
                if let Err(e) = feed.run(quotes).await {
                    error!(source = %feed.name(), error = %e, "Feed stopped with error");
                }
            });
        }
        drop(tx);

        info!(feeds = self.feeds.len(), "Bot running");

        let mut open = true;
        loop {
            tokio::select! {
                biased;
                _ = self.stopped.cancelled() => break,
                received = rx.recv(), if open => match received {
                    Some(quote) => self.observe(quote),
                    None => {
                        warn!("All feeds have ended, waiting for quit");
                        open = false;
                    }
                },
            }
        }

        // Feeds have drained, pick up whatever is still buffered
        while let Ok(quote) = rx.try_recv() {
            self.observe(quote);
        }

        // Stalled feeds already used up their grace period in quit
        let stalled: Vec<String> = self.stalled.iter().map(|name| name.key().clone()).collect();
        let mut aborted = supervisor.abort(&stalled);
        aborted.extend(supervisor.shutdown_all(self.config.shutdown_timeout()).await);
        if !aborted.is_empty() {
            warn!(?aborted, "Feed tasks aborted during shutdown");
        }

        info!("Bot stopped");
        Ok(())
    }

    /// Stops every feed and unblocks [`Bot::run`] once all of them have
    /// acknowledged. Only the first call does anything.
    pub async fn quit(&self) -> Result<()> {
        if self.quitting.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyQuit);
        }

        info!(feeds = self.feeds.len(), "Waiting for all feeds to quit gracefully");
        let grace = self.config.shutdown_timeout();

        let results = join_all(self.feeds.iter().map(|feed| async move {
            match timeout(grace, feed.quit()).await {
                Ok(result) => result,
                Err(_) => {
                    self.stalled.insert(feed.name().to_string());
                    Err(Error::ShutdownTimeout {
                        feed: feed.name().to_string(),
                        after: grace,
                    })
                }
            }
        }))
        .await;

        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                error!(error = %e, "Feed did not stop cleanly");
                first_error.get_or_insert(e);
            }
        }

        self.stopped.cancel();

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn observe(&self, quote: Quote) {
        QUOTES_RECEIVED.with_label_values(&[quote.source.as_str()]).inc();
        debug!(
            source = %quote.source,
            market = %quote.market,
            bid = %quote.bid,
            ask = %quote.ask,
            last = %quote.last,
            spread = %quote.spread(),
            "Quote"
        );

        self.book.update(quote.clone());
        // No receivers is fine
        let _ = self.subscribers.send(quote);
    }
}
