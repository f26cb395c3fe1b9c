//! Market data types

use rust_decimal::Decimal;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Server time response
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ServerTime {
    /// Milliseconds since epoch
    #[serde(rename = "serverTime")]
    pub server_time: u64,
}

/// Latest price for a trading symbol
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Trading symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Last price
    pub price: Decimal,
}

/// Order book snapshot for a symbol
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    /// Update sequence number of this snapshot
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: u64,
    /// Bid levels, best first
    pub bids: Vec<OrderBookLevel>,
    /// Ask levels, best first
    pub asks: Vec<OrderBookLevel>,
}

impl OrderBook {
    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|level| level.price)
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|level| level.price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// A single price level in the order book
///
/// The exchange encodes levels as positional JSON arrays
/// (`["price", "qty", ...]`); trailing elements are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBookLevel {
    /// Price of this level
    pub price: Decimal,
    /// Quantity resting at this level
    pub qty: Decimal,
}

impl<'de> Deserialize<'de> for OrderBookLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LevelVisitor;

        impl<'de> Visitor<'de> for LevelVisitor {
            type Value = OrderBookLevel;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an array [price, qty, ...]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let price: Decimal = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let qty: Decimal = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                // Drain trailing elements (older API versions append an
                // empty array per level).
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(OrderBookLevel { price, qty })
            }
        }

        deserializer.deserialize_seq(LevelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn server_time_deserializes() {
        let time: ServerTime = serde_json::from_str(r#"{"serverTime":1499827319559}"#).unwrap();
        assert_eq!(time.server_time, 1_499_827_319_559);
    }

    #[test]
    fn ticker_price_parses_from_string() {
        let ticker: Ticker =
            serde_json::from_str(r#"{"symbol":"ETHBTC","price":"0.05374700"}"#).unwrap();
        assert_eq!(ticker.symbol, "ETHBTC");
        assert_eq!(ticker.price, dec!(0.05374700));
    }

    #[test]
    fn order_book_levels_decode_positionally() {
        let book: OrderBook = serde_json::from_str(
            r#"{
                "lastUpdateId": 1027024,
                "bids": [["4.00000000", "431.00000000", []]],
                "asks": [["4.00000200", "12.00000000", []]]
            }"#,
        )
        .unwrap();

        assert_eq!(book.last_update_id, 1_027_024);
        assert_eq!(book.best_bid(), Some(dec!(4.00000000)));
        assert_eq!(book.best_ask(), Some(dec!(4.00000200)));
        assert_eq!(book.bids[0].qty, dec!(431.00000000));
        assert_eq!(book.spread(), Some(dec!(0.00000200)));
    }

    #[test]
    fn order_book_level_rejects_short_arrays() {
        let result: Result<OrderBookLevel, _> = serde_json::from_str(r#"["4.0"]"#);
        assert!(result.is_err());
    }
}
