//! Account and balance types

use rust_decimal::Decimal;
use serde::Deserialize;

/// Account information
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Maker commission in basis points
    pub maker_commission: u64,
    /// Taker commission in basis points
    pub taker_commission: u64,
    /// Buyer commission in basis points
    pub buyer_commission: u64,
    /// Seller commission in basis points
    pub seller_commission: u64,
    /// Whether the account may trade
    pub can_trade: bool,
    /// Whether the account may withdraw
    pub can_withdraw: bool,
    /// Whether the account may deposit
    pub can_deposit: bool,
    /// Per-asset balances
    pub balances: Vec<Balance>,
}

impl AccountInfo {
    /// Get the balance for a specific asset
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|b| b.asset == asset)
    }

    /// Get all balances with non-zero free or locked amounts
    pub fn non_zero_balances(&self) -> impl Iterator<Item = &Balance> {
        self.balances
            .iter()
            .filter(|b| !b.free.is_zero() || !b.locked.is_zero())
    }
}

/// Balance for a single asset
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Asset symbol (e.g., "BTC")
    pub asset: String,
    /// Amount available for trading
    pub free: Decimal,
    /// Amount locked in open orders
    pub locked: Decimal,
}

impl Balance {
    /// Total balance (free + locked)
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ACCOUNT_JSON: &str = r#"{
        "makerCommission": 15,
        "takerCommission": 15,
        "buyerCommission": 0,
        "sellerCommission": 0,
        "canTrade": true,
        "canWithdraw": true,
        "canDeposit": true,
        "balances": [
            {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
            {"asset": "LTC", "free": "0.00000000", "locked": "0.00000000"}
        ]
    }"#;

    #[test]
    fn account_info_deserializes() {
        let info: AccountInfo = serde_json::from_str(ACCOUNT_JSON).unwrap();
        assert_eq!(info.maker_commission, 15);
        assert!(info.can_trade);
        assert_eq!(info.balances.len(), 2);
    }

    #[test]
    fn balance_lookup_and_totals() {
        let info: AccountInfo = serde_json::from_str(ACCOUNT_JSON).unwrap();
        let btc = info.balance("BTC").unwrap();
        assert_eq!(btc.free, dec!(4723846.89208129));
        assert_eq!(btc.total(), dec!(4723846.89208129));
        assert!(info.balance("DOGE").is_none());

        let non_zero: Vec<_> = info.non_zero_balances().collect();
        assert_eq!(non_zero.len(), 1);
        assert_eq!(non_zero[0].asset, "BTC");
    }
}
