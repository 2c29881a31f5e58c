use rust_decimal::Decimal;
use serde::Deserialize;
use crate::types::Market;

/// Envelope shared by every public endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub result: Option<T>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketSummary {
    pub market_currency: String,
    pub base_currency: String,
    pub market_currency_long: Option<String>,
    pub base_currency_long: Option<String>,
    pub min_trade_size: Decimal,
    pub market_name: String,
    pub is_active: bool,
    pub created: Option<String>,
}

impl From<MarketSummary> for Market {
    fn from(summary: MarketSummary) -> Self {
        Market {
            name: summary.market_name,
            market_currency: summary.market_currency,
            base_currency: summary.base_currency,
            min_trade_size: summary.min_trade_size,
            is_active: summary.is_active,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Currency {
    pub currency: String,
    pub currency_long: String,
    pub min_confirmation: u32,
    pub tx_fee: Decimal,
    pub is_active: bool,
    pub coin_type: String,
    pub base_address: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticker {
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
}
