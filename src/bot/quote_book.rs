use dashmap::DashMap;
use crate::types::Quote;

/// Latest quote per (source, market). Each update replaces the previous one.
pub struct QuoteBook {
    quotes: DashMap<(String, String), Quote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        QuoteBook {
            quotes: DashMap::new(),
        }
    }

    pub fn update(&self, quote: Quote) -> Option<Quote> {
        let key = (quote.source.clone(), quote.market.clone());
        self.quotes.insert(key, quote)
    }

    pub fn get(&self, source: &str, market: &str) -> Option<Quote> {
        self.quotes
            .get(&(source.to_string(), market.to_string()))
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// All quotes, ordered by source then market.
    pub fn snapshot(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self.quotes.iter().map(|entry| entry.value().clone()).collect();
        quotes.sort_by(|a, b| (&a.source, &a.market).cmp(&(&b.source, &b.market)));
        quotes
    }
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn quote(source: &str, market: &str, last: i64) -> Quote {
        Quote::new(source, market, Decimal::ZERO, Decimal::ZERO, Decimal::from(last))
    }

    #[test]
    fn update_replaces_previous_quote() {
        let book = QuoteBook::new();
        assert!(book.update(quote("bittrex", "BTC-LTC", 1)).is_none());

        let previous = book.update(quote("bittrex", "BTC-LTC", 2)).unwrap();

        assert_eq!(previous.last, Decimal::from(1));
        assert_eq!(book.get("bittrex", "BTC-LTC").unwrap().last, Decimal::from(2));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn same_market_is_tracked_per_source() {
        let book = QuoteBook::new();
        book.update(quote("b", "BTC-ETH", 1));
        book.update(quote("a", "BTC-ETH", 1));
        book.update(quote("a", "BTC-ADA", 1));

        let keys: Vec<_> = book.snapshot().into_iter().map(|q| (q.source, q.market)).collect();
        assert_eq!(keys, vec![
            ("a".to_string(), "BTC-ADA".to_string()),
            ("a".to_string(), "BTC-ETH".to_string()),
            ("b".to_string(), "BTC-ETH".to_string()),
        ]);
    }
}
