use serde::de::DeserializeOwned;
use crate::error::{Error, Result};
use crate::sources::bittrex::BittrexSource;
use crate::sources::bittrex::types::{ApiResponse, Currency, MarketSummary, Ticker};

pub const GET_MARKETS_ENDPOINT: &str = "/public/getmarkets";
pub const GET_CURRENCIES_ENDPOINT: &str = "/public/getcurrencies";
pub const GET_TICKER_ENDPOINT: &str = "/public/getticker";

impl BittrexSource {
    pub async fn get_markets(&self) -> Result<Vec<MarketSummary>> {
        self.get(GET_MARKETS_ENDPOINT, &[]).await
    }

    pub async fn get_currencies(&self) -> Result<Vec<Currency>> {
        self.get(GET_CURRENCIES_ENDPOINT, &[]).await
    }

    pub async fn get_ticker(&self, market: &str) -> Result<Ticker> {
        self.get(GET_TICKER_ENDPOINT, &[("market", market)]).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.host(), endpoint);

        let body = self.client.get(&url)
            .query(query)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| Error::Transport(e.to_string()))?
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        decode_response(&body)
    }
}

/// Unwraps the `{success, message, result}` envelope.
pub(crate) fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: ApiResponse<T> = serde_json::from_str(body)
        .map_err(|e| Error::Decode(e.to_string()))?;

    if !response.success {
        return Err(Error::Source(response.message.unwrap_or_default()));
    }

    response.result.ok_or(Error::EmptyResult)
}
