//! Order request and response types

use crate::enums::{OrderSide, OrderStatus, OrderType, TimeInForce};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Request to place an order
///
/// The order type (limit vs. market) is chosen by the endpoint method, not
/// by this struct: `place_limit_order` requires a price, and
/// `place_market_order` rejects one.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    /// Trading symbol
    pub symbol: String,
    /// Order side
    pub side: OrderSide,
    /// Order quantity
    pub quantity: Decimal,
    /// Limit price (required for limit orders, forbidden for market)
    pub price: Option<Decimal>,
    /// Time in force (limit orders only)
    pub time_in_force: TimeInForce,
    /// Client-assigned order id
    pub new_client_order_id: Option<String>,
    /// Stop price (stop orders)
    pub stop_price: Option<Decimal>,
    /// Visible quantity for iceberg orders
    pub iceberg_qty: Option<Decimal>,
    /// Clock-skew tolerance in milliseconds
    pub recv_window: Option<u64>,
}

impl PlaceOrderRequest {
    /// Create an order request for the given symbol, side, and quantity
    pub fn new(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            price: None,
            time_in_force: TimeInForce::GoodTillCancelled,
            new_client_order_id: None,
            stop_price: None,
            iceberg_qty: None,
            recv_window: None,
        }
    }

    /// Set the limit price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    /// Set a client-assigned order id
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    /// Set a stop price
    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Set the visible iceberg quantity
    pub fn with_iceberg_qty(mut self, qty: Decimal) -> Self {
        self.iceberg_qty = Some(qty);
        self
    }

    /// Set the recv window
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }
}

/// Response from placing an order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    /// Trading symbol
    pub symbol: String,
    /// Exchange-assigned order id
    pub order_id: u64,
    /// Client order id (echoed or generated)
    pub client_order_id: String,
    /// Transaction time in milliseconds
    pub transact_time: u64,
}

/// An order as reported by the exchange
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Trading symbol
    pub symbol: String,
    /// Exchange-assigned order id
    pub order_id: u64,
    /// Client order id
    pub client_order_id: String,
    /// Order price
    pub price: Decimal,
    /// Original quantity
    pub orig_qty: Decimal,
    /// Executed quantity
    pub executed_qty: Decimal,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Time in force
    pub time_in_force: TimeInForce,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order side
    pub side: OrderSide,
    /// Stop price, if any
    pub stop_price: Option<Decimal>,
    /// Iceberg quantity, if any
    pub iceberg_qty: Option<Decimal>,
    /// Creation time in milliseconds
    pub time: u64,
}

/// Request to cancel an order
///
/// Either `order_id` or `orig_client_order_id` must be set.
#[derive(Debug, Clone)]
pub struct CancelOrderRequest {
    /// Trading symbol
    pub symbol: String,
    /// Exchange-assigned order id
    pub order_id: Option<u64>,
    /// Client order id the order was placed with
    pub orig_client_order_id: Option<String>,
    /// Client id to assign to the cancel itself
    pub new_client_order_id: Option<String>,
    /// Clock-skew tolerance in milliseconds
    pub recv_window: Option<u64>,
}

impl CancelOrderRequest {
    /// Create a cancel request for the given symbol
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: None,
            new_client_order_id: None,
            recv_window: None,
        }
    }

    /// Target the order by exchange id
    pub fn with_order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Target the order by its original client id
    pub fn with_orig_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.orig_client_order_id = Some(id.into());
        self
    }

    /// Assign a client id to the cancel request
    pub fn with_new_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    /// Set the recv window
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }
}

/// Response from cancelling an order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderResponse {
    /// Trading symbol
    pub symbol: String,
    /// Client order id the order was placed with
    pub orig_client_order_id: Option<String>,
    /// Exchange-assigned order id
    pub order_id: u64,
    /// Client id of the cancel
    pub client_order_id: String,
}
