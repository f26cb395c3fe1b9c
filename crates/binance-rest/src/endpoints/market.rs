//! Public market data endpoints
//!
//! These endpoints don't require signing.

use crate::client::BinanceRestClient;
use crate::error::{RestError, RestResult};
use crate::request::RequestBuilder;
use crate::response::decode;
use binance_types::{OrderBook, ServerTime, Ticker};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

const TIME_PATH: &str = "/api/v1/time";
const ALL_PRICES_PATH: &str = "/api/v1/ticker/allPrices";
const DEPTH_PATH: &str = "/api/v1/depth";

/// Depth limit values accepted by the exchange
const DEPTH_LIMITS: [u16; 7] = [5, 10, 20, 50, 100, 200, 500];

/// Default number of depth levels
const DEFAULT_DEPTH_LIMIT: u16 = 100;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a BinanceRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient) -> Self {
        Self { client }
    }

    /// Get current server time
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        debug!("Fetching server time");

        let request = RequestBuilder::new(self.client.url_for(TIME_PATH)).build();
        let body = self.client.execute(request).await?;
        decode(&body)
    }

    /// Get latest prices for all symbols
    #[instrument(skip(self))]
    pub async fn get_all_prices(&self) -> RestResult<Vec<Ticker>> {
        debug!("Fetching all symbol prices");

        let request = RequestBuilder::new(self.client.url_for(ALL_PRICES_PATH)).build();
        let body = self.client.execute(request).await?;
        decode(&body)
    }

    /// Get the latest price for a single symbol
    ///
    /// Returns `Ok(None)` when the symbol is not listed.
    #[instrument(skip(self))]
    pub async fn get_latest_price(&self, symbol: &str) -> RestResult<Option<Decimal>> {
        let tickers = self.get_all_prices().await?;
        let price = tickers
            .into_iter()
            .find(|t| t.symbol == symbol)
            .map(|t| t.price);

        if price.is_none() {
            warn!(%symbol, "symbol not found in price list");
        }
        Ok(price)
    }

    /// Get order book depth for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol (e.g., "BTCUSDT")
    /// * `limit` - Number of levels (default 100); must be one of
    ///   5, 10, 20, 50, 100, 200, 500
    #[instrument(skip(self))]
    pub async fn get_depth(&self, symbol: &str, limit: Option<u16>) -> RestResult<OrderBook> {
        let limit = limit.unwrap_or(DEFAULT_DEPTH_LIMIT);
        if !DEPTH_LIMITS.contains(&limit) {
            return Err(RestError::InvalidParameter(format!(
                "depth limit {} not in allowed set {:?}",
                limit, DEPTH_LIMITS
            )));
        }

        debug!(%symbol, limit, "Fetching order book depth");

        let request = RequestBuilder::new(self.client.url_for(DEPTH_PATH))
            .param("symbol", symbol)
            .param("limit", limit.to_string())
            .build();
        let body = self.client.execute(request).await?;
        decode(&body)
    }
}
