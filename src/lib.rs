pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod observability;
pub mod poller;
pub mod sources;
pub mod types;
pub mod utils;

pub use bot::Bot;
pub use error::{Error, Result};
pub use poller::BatchedPoller;
pub use types::{Market, Quote};
