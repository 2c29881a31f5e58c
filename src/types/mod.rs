pub mod market;
pub mod quote;

pub use market::Market;
pub use quote::Quote;
