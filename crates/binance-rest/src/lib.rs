//! REST API client for the Binance cryptocurrency exchange
//!
//! This crate provides a REST client for trading on Binance, covering
//! market data (server time, prices, order book depth) and signed trading
//! operations (place/cancel/query orders, account info).
//!
//! # Authentication
//!
//! Signed endpoints require API credentials. Requests are signed with a
//! keyed hash over the canonical parameter string: HMAC-SHA256 for signed
//! GET requests and HMAC-SHA512 for signed mutating requests, with the
//! timestamp injected immediately before signing. The API key travels in
//! the `X-MBX-APIKEY` header and is never part of the signed payload.
//!
//! # Example
//!
//! ```no_run
//! use binance_rest::{BinanceRestClient, Credentials};
//! use binance_types::{OrderSide, PlaceOrderRequest};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BinanceRestClient::new();
//!     let book = client.get_depth("BTCUSDT", Some(20)).await?;
//!     println!("best bid: {:?}", book.best_bid());
//!
//!     // Signed endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BinanceRestClient::with_credentials(creds);
//!     let order = PlaceOrderRequest::new("BTCUSDT", OrderSide::Buy, dec!(0.001))
//!         .with_price(dec!(30000));
//!     let placed = auth_client.place_limit_order(order).await?;
//!     println!("order id: {}", placed.order_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The HTTP transport is an explicit dependency of the client. Enable the
//! `test-utils` feature and inject a [`transport::MockTransport`] through
//! [`ClientConfig::with_transport`] to exercise the full request pipeline
//! without network access.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod transport;

// Re-export main types
pub use auth::{Credentials, SignatureAlgorithm};
pub use client::{BinanceRestClient, ClientConfig};
pub use error::{RestError, RestResult};
pub use query::ParamSet;
pub use request::{HttpMethod, PendingRequest, ReadyRequest, RequestBuilder};
pub use transport::{HttpTransport, Transport, TransportError};

// Re-export the data shapes for convenience
pub use binance_types as types;
