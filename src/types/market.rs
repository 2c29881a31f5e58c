use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tradable market as listed by a quote source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub name: String,
    pub market_currency: String,
    pub base_currency: String,
    pub min_trade_size: Decimal,
    pub is_active: bool,
}

impl Market {
    pub fn new(name: impl Into<String>) -> Self {
        Market {
            name: name.into(),
            market_currency: String::new(),
            base_currency: String::new(),
            min_trade_size: Decimal::ZERO,
            is_active: true,
        }
    }
}
