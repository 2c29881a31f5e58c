use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub source: String,
    pub market: String,
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
    pub time: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        source: impl Into<String>,
        market: impl Into<String>,
        bid: Decimal,
        ask: Decimal,
        last: Decimal,
    ) -> Self {
        Quote {
            source: source.into(),
            market: market.into(),
            bid,
            ask,
            last,
            time: Utc::now(),
        }
    }

    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}
