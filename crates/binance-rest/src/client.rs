//! Main REST client implementation

use crate::auth::Credentials;
use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::request::{timestamp_ms, PendingRequest};
use crate::response::check_for_error;
use crate::transport::{HttpTransport, Transport};
use binance_types::{
    AccountInfo, CancelOrderRequest, CancelOrderResponse, Order, OrderBook, PlaceOrderRequest,
    PlaceOrderResponse, ServerTime, Ticker,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Default API host
const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Binance REST API client
///
/// Provides access to both public and signed endpoints.
///
/// # Example
///
/// ```no_run
/// use binance_rest::{BinanceRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BinanceRestClient::new();
///     let time = client.get_server_time().await?;
///
///     // With credentials for signed endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BinanceRestClient::with_credentials(creds);
///     let account = auth_client.get_account(None).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BinanceRestClient {
    transport: Arc<dyn Transport>,
    credentials: Option<Credentials>,
    base_url: String,
}

impl BinanceRestClient {
    /// Create a new client without credentials
    ///
    /// Only public endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and signed) will be available.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    ///
    /// The transport is an explicit dependency: pass one through
    /// [`ClientConfig::with_transport`] to substitute a mock in tests,
    /// otherwise a pooled HTTP transport is built from the config.
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = config.transport.unwrap_or_else(|| {
            Arc::new(HttpTransport::with_timeout(
                Duration::from_secs(config.timeout_secs),
                config.user_agent.as_deref(),
            ))
        });

        info!("Created Binance REST client");

        Self {
            transport,
            credentials: config.credentials,
            base_url: config.base_url,
        }
    }

    /// Check if the client has credentials for signed endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Resolve an API path against the configured host
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Credentials, if configured
    pub(crate) fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Finalize, dispatch, and validate a request
    ///
    /// Exactly one network attempt is made; the raw body is checked for an
    /// embedded exchange error before being returned for typed decoding.
    pub(crate) async fn execute(&self, request: PendingRequest) -> RestResult<String> {
        let ready = request.finalize(self.credentials.as_ref(), timestamp_ms())?;
        let response = self.transport.send(&ready).await?;

        if !response.is_success() {
            warn!(status = response.status, "non-success HTTP status");
        }

        check_for_error(&response.body)?;
        Ok(response.body)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get current server time
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().get_server_time().await
    }

    /// Get latest prices for all symbols
    pub async fn get_all_prices(&self) -> RestResult<Vec<Ticker>> {
        self.market().get_all_prices().await
    }

    /// Get the latest price for a single symbol
    pub async fn get_latest_price(&self, symbol: &str) -> RestResult<Option<Decimal>> {
        self.market().get_latest_price(symbol).await
    }

    /// Get order book depth for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol (e.g., "BTCUSDT")
    /// * `limit` - Number of levels; one of 5, 10, 20, 50, 100, 200, 500
    pub async fn get_depth(&self, symbol: &str, limit: Option<u16>) -> RestResult<OrderBook> {
        self.market().get_depth(symbol, limit).await
    }

    // ========================================================================
    // Signed Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(TradingEndpoints::new(self, creds))
    }

    /// Place a limit order
    pub async fn place_limit_order(
        &self,
        order: PlaceOrderRequest,
    ) -> RestResult<PlaceOrderResponse> {
        self.trading()?.place_limit_order(order).await
    }

    /// Place a market order
    pub async fn place_market_order(
        &self,
        order: PlaceOrderRequest,
    ) -> RestResult<PlaceOrderResponse> {
        self.trading()?.place_market_order(order).await
    }

    /// Query a single order
    pub async fn get_order(&self, symbol: &str, order_id: u64) -> RestResult<Order> {
        self.trading()?.get_order(symbol, Some(order_id), None, None).await
    }

    /// Get open orders for a symbol
    pub async fn open_orders(&self, symbol: &str) -> RestResult<Vec<Order>> {
        self.trading()?.open_orders(symbol, None).await
    }

    /// Cancel an order
    pub async fn cancel_order(
        &self,
        request: CancelOrderRequest,
    ) -> RestResult<CancelOrderResponse> {
        self.trading()?.cancel_order(request).await
    }

    // ========================================================================
    // Signed Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(self, creds))
    }

    /// Get account information
    pub async fn get_account(&self, recv_window: Option<u64>) -> RestResult<AccountInfo> {
        self.account()?.get_account(recv_window).await
    }
}

impl Default for BinanceRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BinanceRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// API host
    pub base_url: String,
    /// Injected transport; defaults to a pooled HTTP transport
    pub transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the API host (useful against testnets)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Inject a transport implementation
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url)
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn mock_client(mock: Arc<MockTransport>) -> BinanceRestClient {
        BinanceRestClient::with_config(
            ClientConfig::new()
                .with_credentials(Credentials::new("test-key", "test-secret"))
                .with_transport(mock),
        )
    }

    #[test]
    fn client_without_credentials() {
        let client = BinanceRestClient::new();
        assert!(!client.has_credentials());
        assert!(matches!(client.trading(), Err(RestError::AuthRequired)));
        assert!(matches!(client.account(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("https://testnet.binance.vision");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.base_url, "https://testnet.binance.vision");
    }

    #[tokio::test]
    async fn embedded_exchange_error_wins_over_success_status() {
        let mock = Arc::new(MockTransport::with_response(
            r#"{"code":-1013,"msg":"Filter failure: PRICE_FILTER"}"#,
        ));
        let client = mock_client(mock);

        let err = client.get_server_time().await.unwrap_err();
        assert_eq!(err.exchange_code(), Some(-1013));
    }

    #[tokio::test]
    async fn transport_failure_is_fatal_for_the_call() {
        let mock = Arc::new(MockTransport::new());
        mock.push_error(crate::transport::TransportError::RequestFailed(
            "connection reset".into(),
        ));
        let client = mock_client(mock.clone());

        let err = client.get_server_time().await.unwrap_err();
        assert!(matches!(err, RestError::Transport(_)));
        // Single attempt, no retry.
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn non_success_status_still_surfaces_exchange_error() {
        let mock = Arc::new(MockTransport::new());
        mock.push_response(400, r#"{"code":-2010,"msg":"Account has insufficient balance"}"#);
        let client = mock_client(mock);

        let err = client.get_server_time().await.unwrap_err();
        assert_eq!(err.exchange_code(), Some(-2010));
    }
}
