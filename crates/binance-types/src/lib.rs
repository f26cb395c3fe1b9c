//! Shared types for the Binance REST API
//!
//! This crate provides the request and response shapes used by the
//! `binance-rest` client. It has minimal dependencies and can be used
//! independently.
//!
//! # Key Types
//!
//! - [`Ticker`], [`OrderBook`], [`ServerTime`] - Market data
//! - [`PlaceOrderRequest`], [`Order`], [`CancelOrderRequest`] - Trading
//! - [`AccountInfo`], [`Balance`] - Account state
//! - [`OrderSide`], [`OrderType`], [`TimeInForce`], [`OrderStatus`] - Enums
//!
//! All prices and quantities use [`rust_decimal::Decimal`]; Binance
//! serializes them as JSON strings, which the `serde-with-str` feature
//! handles transparently.

pub mod account;
pub mod enums;
pub mod market;
pub mod order;

// Re-export commonly used types
pub use account::*;
pub use enums::*;
pub use market::*;
pub use order::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
