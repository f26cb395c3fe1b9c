//! Signed account endpoints
//!
//! These endpoints require credentials.

use crate::auth::Credentials;
use crate::client::BinanceRestClient;
use crate::error::RestResult;
use crate::request::RequestBuilder;
use crate::response::decode;
use binance_types::AccountInfo;
use tracing::{debug, instrument};

const ACCOUNT_PATH: &str = "/api/v3/account";

/// Signed account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a BinanceRestClient,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient, credentials: &'a Credentials) -> Self {
        Self { client, credentials }
    }

    /// Get account information (commissions, permissions, balances)
    #[instrument(skip(self))]
    pub async fn get_account(&self, recv_window: Option<u64>) -> RestResult<AccountInfo> {
        debug!("Fetching account info");

        let request = RequestBuilder::new(self.client.url_for(ACCOUNT_PATH))
            .opt_param("recvWindow", recv_window.map(|w| w.to_string()))
            .signed(self.credentials)
            .build();

        let body = self.client.execute(request).await?;
        decode(&body)
    }
}
