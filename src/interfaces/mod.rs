pub mod quote_source;
pub mod quote_feed;

pub use quote_feed::QuoteFeed;
pub use quote_source::QuoteSource;
