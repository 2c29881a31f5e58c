use lazy_static::lazy_static;
use prometheus::{IntCounterVec, IntGaugeVec, Opts, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Quote metrics
    pub static ref QUOTES_RECEIVED: IntCounterVec = IntCounterVec::new(
        Opts::new("quotes_received_total", "Quotes observed by the bot"),
        &["source"]
    ).unwrap();

    pub static ref QUOTE_FETCH_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("quote_fetch_failures_total", "Failed quote fetches by error kind"),
        &["source", "kind"]
    ).unwrap();

    // Polling metrics
    pub static ref LISTING_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("market_listing_failures_total", "Failed market listing attempts"),
        &["source"]
    ).unwrap();

    pub static ref BATCHES_DISPATCHED: IntCounterVec = IntCounterVec::new(
        Opts::new("batches_dispatched_total", "Quote batches launched"),
        &["source"]
    ).unwrap();

    pub static ref FETCHES_IN_FLIGHT: IntGaugeVec = IntGaugeVec::new(
        Opts::new("quote_fetches_in_flight", "Quote fetches currently outstanding"),
        &["source"]
    ).unwrap();
}

/// Registers every collector with [`REGISTRY`]. Safe to call more than once.
pub fn register_metrics() -> prometheus::Result<()> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(QUOTES_RECEIVED.clone()),
        Box::new(QUOTE_FETCH_FAILURES.clone()),
        Box::new(LISTING_FAILURES.clone()),
        Box::new(BATCHES_DISPATCHED.clone()),
        Box::new(FETCHES_IN_FLIGHT.clone()),
    ];

    for collector in collectors {
        match REGISTRY.register(collector) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
