//! Error types for REST API operations

use crate::transport::TransportError;

/// Errors that can occur during REST API operations
///
/// Callers can match exhaustively to distinguish business-level rejections
/// (`Exchange`), network failures (`Transport`), and bad inputs caught
/// before any network activity (`InvalidParameter`).
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Exchange rejected the request at the business level
    ///
    /// Carried in the response body as `{"code": <int>, "msg": <string>}`,
    /// independent of the HTTP status code.
    #[error("exchange error {code}: {msg}")]
    Exchange {
        /// Exchange-defined numeric error code
        code: i64,
        /// Error message from the exchange
        msg: String,
    },

    /// Network-level failure during execution
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid request parameters, caught before any network call
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing API credentials for a signed endpoint
    #[error("authentication required for this endpoint")]
    AuthRequired,

    /// Failed to decode a response body
    #[error("parse error: {0}")]
    Parse(String),

    /// Environment variable not set
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),
}

impl RestError {
    /// Check if this error is a business-level rejection from the exchange
    pub fn is_exchange_error(&self) -> bool {
        matches!(self, Self::Exchange { .. })
    }

    /// The exchange error code, if this is an exchange error
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            Self::Exchange { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
