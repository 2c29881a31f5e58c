//! Batched polling loop for one quote source.
//!
//! The loop lists markets, splits them into batches and launches one fetch
//! task per market, pacing batches with a fixed interval. Cancellation is
//! observed between batches and while a batch waits for fetch permits, never
//! in the middle of launching one. Once cancelled the loop waits for every
//! launched task before it reports [`PollerState::Stopped`].

pub mod batch;
pub mod state;

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::{mpsc, watch, Semaphore};
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, trace, warn, Instrument};
use crate::config::poller::PollerConfig;
use crate::error::{Error, Result};
use crate::interfaces::{QuoteFeed, QuoteSource};
use crate::observability::metrics::{
    BATCHES_DISPATCHED, FETCHES_IN_FLIGHT, LISTING_FAILURES, QUOTE_FETCH_FAILURES,
};
use crate::observability::tracing::{fetch_span, poller_span};
use crate::poller::batch::Batches;
use crate::types::Quote;

pub use state::PollerState;

pub struct BatchedPoller {
    name: String,
    source: Arc<dyn QuoteSource>,
    config: PollerConfig,
    cancel: CancellationToken,
    state: watch::Sender<PollerState>,
}

impl BatchedPoller {
    pub fn new(name: impl Into<String>, source: Arc<dyn QuoteSource>, config: PollerConfig) -> Self {
        let (state, _) = watch::channel(PollerState::Idle);
        BatchedPoller {
            name: name.into(),
            source,
            config,
            cancel: CancellationToken::new(),
            state,
        }
    }

    pub fn state(&self) -> PollerState {
        *self.state.borrow()
    }

    fn transition(&self, next: PollerState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            trace!(source = %self.name, from = %previous, to = %next, "Poller state changed");
        }
    }

    /// Sleeps for `duration` unless cancelled first. Returns true on cancellation.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => true,
            _ = sleep(duration) => false,
        }
    }

    async fn poll(&self, quotes: &mpsc::Sender<Quote>) {
        let tracker = TaskTracker::new();
        let permits = Arc::new(Semaphore::new(self.config.batch_size.max(1)));
        let interval = self.config.batch_interval();

        'listing: while !self.cancel.is_cancelled() {
            self.transition(PollerState::Listing);

            let listed = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break 'listing,
                listed = timeout(self.config.call_timeout(), self.source.fetch_markets()) => listed,
            };

            let markets = match listed.unwrap_or_else(|_| Err(Error::Timeout(self.config.call_timeout()))) {
                Ok(markets) => markets,
                Err(e) => {
                    // Abort this sweep and retry after one pacing interval
                    warn!(source = %self.name, error = %e, "Get markets failed");
                    LISTING_FAILURES.with_label_values(&[self.name.as_str()]).inc();
                    self.transition(PollerState::Pacing);
                    if self.pause(interval).await {
                        break 'listing;
                    }
                    continue;
                }
            };

            if markets.is_empty() {
                debug!(source = %self.name, "Source listed no markets");
                self.transition(PollerState::Pacing);
                if self.pause(interval).await {
                    break 'listing;
                }
                continue;
            }

            debug!(source = %self.name, markets = markets.len(), "Starting sweep");

            let names = markets.into_iter().map(|m| m.name);
            for batch in Batches::new(names, self.config.batch_size) {
                if self.cancel.is_cancelled() {
                    break 'listing;
                }

                self.transition(PollerState::Dispatching);
                if !self.dispatch(batch, &tracker, &permits, quotes).await {
                    break 'listing;
                }

                self.transition(PollerState::Pacing);
                if self.pause(interval).await {
                    break 'listing;
                }
            }

            if let Some(refresh) = self.config.refresh_interval() {
                if self.pause(refresh).await {
                    break 'listing;
                }
            }
        }

        self.transition(PollerState::Draining);
        tracker.close();
        info!(source = %self.name, outstanding = tracker.len(), "Waiting for quote fetches to finish");
        tracker.wait().await;
    }

    /// Launches every market of `batch` once the whole batch holds permits.
    /// Returns false, launching nothing, when cancelled while waiting.
    async fn dispatch(
        &self,
        batch: Vec<String>,
        tracker: &TaskTracker,
        permits: &Arc<Semaphore>,
        quotes: &mpsc::Sender<Quote>,
    ) -> bool {
        let wanted = batch.len() as u32;
        let acquired = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!(source = %self.name, size = batch.len(), "Cancelled before batch launch");
                return false;
            }
            acquired = Arc::clone(permits).acquire_many_owned(wanted) => acquired,
        };
        let mut reserved = match acquired {
            Ok(reserved) => reserved,
            Err(e) => {
                warn!(source = %self.name, error = %e, "Fetch permits closed, draining");
                return false;
            }
        };

        BATCHES_DISPATCHED.with_label_values(&[self.name.as_str()]).inc();
        debug!(source = %self.name, size = batch.len(), "Dispatching batch");

        for market in batch {
            let permit = reserved.split(1);
            let span = fetch_span(&self.name, &market);
            let source = Arc::clone(&self.source);
            let quotes = quotes.clone();
            let feed = self.name.clone();
            let call_timeout = self.config.call_timeout();

            // Registered with the tracker before the task can run, so a
            // concurrent drain never observes zero outstanding work mid-launch.
            FETCHES_IN_FLIGHT.with_label_values(&[feed.as_str()]).inc();
            tracker.spawn(
                async move {
                    fetch_and_forward(&feed, source.as_ref(), &market, call_timeout, &quotes).await;
                    FETCHES_IN_FLIGHT.with_label_values(&[feed.as_str()]).dec();
                    drop(permit);
                }
                .instrument(span),
            );
        }

        true
    }
}

async fn fetch_and_forward(
    feed: &str,
    source: &dyn QuoteSource,
    market: &str,
    call_timeout: Duration,
    quotes: &mpsc::Sender<Quote>,
) {
    let fetched = timeout(call_timeout, source.fetch_quote(market))
        .await
        .unwrap_or_else(|_| Err(Error::Timeout(call_timeout)));

    match fetched {
        Ok(Some(quote)) if !quote.market.trim().is_empty() => {
            if quotes.send(quote).await.is_err() {
                debug!(source = %feed, market = %market, "Quote stream closed, dropping quote");
            }
        }
        Ok(_) => trace!(source = %feed, market = %market, "Skipped market"),
        Err(e) => {
            warn!(source = %feed, market = %market, error = %e, "Get ticker failed");
            QUOTE_FETCH_FAILURES.with_label_values(&[feed, e.kind()]).inc();
        }
    }
}

#[async_trait]
impl QuoteFeed for BatchedPoller {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, quotes: mpsc::Sender<Quote>) -> Result<()> {
        let started = self.state.send_if_modified(|state| {
            if *state == PollerState::Idle {
                *state = PollerState::Listing;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(Error::AlreadyRunning(self.name.clone()));
        }

        info!(
            source = %self.name,
            batch_size = self.config.batch_size,
            batch_interval_ms = self.config.batch_interval_ms,
            "Starting quote poller"
        );

        self.poll(&quotes).instrument(poller_span(&self.name)).await;

        self.transition(PollerState::Stopped);
        info!(source = %self.name, "Quote poller stopped");
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        info!(source = %self.name, "Quitting the polling loop");
        self.cancel.cancel();

        let mut state = self.state.subscribe();
        state.wait_for(|s| *s == PollerState::Stopped)
            .await
            .map_err(|_| Error::FeedClosed(self.name.clone()))?;
        Ok(())
    }
}
