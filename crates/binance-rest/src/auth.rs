//! Authentication credentials and request signing
//!
//! Binance signs requests with a keyed hash over the canonical query
//! string: HMAC-SHA256 for signed GET requests and HMAC-SHA512 for signed
//! mutating requests, hex-encoded in lowercase. The asymmetry matches the
//! exchange's verification and must not be collapsed.
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Sha256, Sha512};

use crate::error::{RestError, RestResult};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Keyed-hash variant used for a signature
///
/// GET-style signed requests use the 256-bit variant; body-signed
/// (POST/PUT/DELETE) requests use the 512-bit variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// HMAC-SHA256
    HmacSha256,
    /// HMAC-SHA512
    HmacSha512,
}

/// API credentials for signed requests
///
/// The API key is sent as the `X-MBX-APIKEY` header and is never part of
/// the signed payload; the secret key is only ever used as the HMAC key
/// and is never transmitted. The secret is zeroized when the Credentials
/// are dropped.
pub struct Credentials {
    /// API key (public, sent as a header)
    api_key: String,
    /// Secret key (HMAC key only, zeroized on drop)
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret key
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_SECRET_KEY` from the environment.
    pub fn from_env() -> RestResult<Self> {
        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| RestError::EnvVarNotSet("BINANCE_API_KEY".to_string()))?;
        let secret_key = std::env::var("BINANCE_SECRET_KEY")
            .map_err(|_| RestError::EnvVarNotSet("BINANCE_SECRET_KEY".to_string()))?;

        Ok(Self::new(api_key, secret_key))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a message with the secret key
    ///
    /// Returns the signature as lowercase hexadecimal. Identical inputs
    /// always produce identical signatures.
    pub fn sign(&self, message: &str, algorithm: SignatureAlgorithm) -> String {
        let key = self.secret_key.expose_secret().as_bytes();

        match algorithm {
            SignatureAlgorithm::HmacSha256 => {
                let mut mac =
                    HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
                mac.update(message.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
            SignatureAlgorithm::HmacSha512 => {
                let mut mac =
                    HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
                mac.update(message.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
        }
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret_key: SecretString::from(self.secret_key.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..8.min(self.api_key.len())]),
            )
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
