//! Signed trading endpoints for order management
//!
//! These endpoints require credentials.

use crate::auth::Credentials;
use crate::client::BinanceRestClient;
use crate::error::{RestError, RestResult};
use crate::request::{HttpMethod, RequestBuilder};
use crate::response::decode;
use binance_types::{
    CancelOrderRequest, CancelOrderResponse, Order, OrderType, PlaceOrderRequest,
    PlaceOrderResponse,
};
use tracing::{debug, instrument};

const ORDER_PATH: &str = "/api/v3/order";
const OPEN_ORDERS_PATH: &str = "/api/v3/openOrders";

/// Signed trading endpoints
pub struct TradingEndpoints<'a> {
    client: &'a BinanceRestClient,
    credentials: &'a Credentials,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient, credentials: &'a Credentials) -> Self {
        Self { client, credentials }
    }

    /// Place a limit order
    ///
    /// The request must carry a price; the order's time-in-force is sent
    /// along with it.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn place_limit_order(
        &self,
        order: PlaceOrderRequest,
    ) -> RestResult<PlaceOrderResponse> {
        if order.price.is_none() {
            return Err(RestError::InvalidParameter(
                "limit order requires a price".to_string(),
            ));
        }
        self.place_order(order, OrderType::Limit).await
    }

    /// Place a market order
    ///
    /// The request must not carry a price; the order executes at the
    /// current book price.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn place_market_order(
        &self,
        order: PlaceOrderRequest,
    ) -> RestResult<PlaceOrderResponse> {
        if order.price.is_some() {
            return Err(RestError::InvalidParameter(
                "market order must not carry a price".to_string(),
            ));
        }
        self.place_order(order, OrderType::Market).await
    }

    async fn place_order(
        &self,
        order: PlaceOrderRequest,
        order_type: OrderType,
    ) -> RestResult<PlaceOrderResponse> {
        let mut builder = RequestBuilder::new(self.client.url_for(ORDER_PATH))
            .method(HttpMethod::Post)
            .param("symbol", &order.symbol)
            .param("side", order.side.to_string())
            .param("type", order_type.to_string())
            .param("quantity", order.quantity.to_string());

        if order_type == OrderType::Limit {
            // price presence is checked by the entry points above
            if let Some(price) = order.price {
                builder = builder.param("price", price.to_string());
            }
            builder = builder.param("timeInForce", order.time_in_force.to_string());
        }

        builder = builder
            .opt_param("newClientOrderId", order.new_client_order_id)
            .opt_param("stopPrice", order.stop_price.map(|p| p.to_string()))
            .opt_param("icebergQty", order.iceberg_qty.map(|q| q.to_string()))
            .opt_param("recvWindow", order.recv_window.map(|w| w.to_string()));

        debug!("Placing {} {} order", order.side, order_type);

        let request = builder.signed(self.credentials).build();
        let body = self.client.execute(request).await?;
        decode(&body)
    }

    /// Query a single order
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `order_id` - Exchange-assigned order id
    /// * `orig_client_order_id` - Client order id the order was placed with
    /// * `recv_window` - Clock-skew tolerance in milliseconds
    #[instrument(skip(self))]
    pub async fn get_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        orig_client_order_id: Option<&str>,
        recv_window: Option<u64>,
    ) -> RestResult<Order> {
        let request = RequestBuilder::new(self.client.url_for(ORDER_PATH))
            .param("symbol", symbol)
            .opt_param("orderId", order_id.map(|id| id.to_string()))
            .opt_param("origClientOrderId", orig_client_order_id)
            .opt_param("recvWindow", recv_window.map(|w| w.to_string()))
            .signed(self.credentials)
            .build();

        let body = self.client.execute(request).await?;
        decode(&body)
    }

    /// Get open orders for a symbol
    #[instrument(skip(self))]
    pub async fn open_orders(
        &self,
        symbol: &str,
        recv_window: Option<u64>,
    ) -> RestResult<Vec<Order>> {
        let request = RequestBuilder::new(self.client.url_for(OPEN_ORDERS_PATH))
            .param("symbol", symbol)
            .opt_param("recvWindow", recv_window.map(|w| w.to_string()))
            .signed(self.credentials)
            .build();

        let body = self.client.execute(request).await?;
        decode(&body)
    }

    /// Cancel an order
    ///
    /// Either `order_id` or `orig_client_order_id` must be set; otherwise
    /// the call fails before any network activity. `newClientOrderId` is
    /// sent under its own parameter key, distinct from
    /// `origClientOrderId`, per the exchange's contract.
    #[instrument(skip(self, request), fields(symbol = %request.symbol))]
    pub async fn cancel_order(
        &self,
        request: CancelOrderRequest,
    ) -> RestResult<CancelOrderResponse> {
        if request.order_id.is_none() && request.orig_client_order_id.is_none() {
            return Err(RestError::InvalidParameter(
                "cancel requires orderId or origClientOrderId".to_string(),
            ));
        }

        debug!("Cancelling order");

        let pending = RequestBuilder::new(self.client.url_for(ORDER_PATH))
            .method(HttpMethod::Delete)
            .param("symbol", &request.symbol)
            .opt_param("orderId", request.order_id.map(|id| id.to_string()))
            .opt_param("origClientOrderId", request.orig_client_order_id)
            .opt_param("newClientOrderId", request.new_client_order_id)
            .opt_param("recvWindow", request.recv_window.map(|w| w.to_string()))
            .signed(self.credentials)
            .build();

        let body = self.client.execute(pending).await?;
        decode(&body)
    }
}
