//! Client configuration.
//!
//! A [`ClientConfig`] is built once, validated, and then shared read-only
//! (`Arc<ClientConfig>`) by the facade and every manager. It is the only
//! source of endpoints and credentials.

use std::time::Duration;

use crate::error::{SdkError, SdkResult};
use crate::network::{Cluster, DEFAULT_API_URL};
use crate::rpc::Commitment;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default attempt count used by [`LicenseChainClient::with_retries`](crate::client::LicenseChainClient::with_retries).
pub const DEFAULT_RETRIES: u32 = 3;

/// Default base delay between retry attempts in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Immutable SDK configuration.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    rpc_url: String,
    timeout: Duration,
    retries: u32,
    retry_delay: Duration,
    commitment: Commitment,
}

impl ClientConfig {
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key)
    }

    /// Build a config from environment variables.
    ///
    /// Reads `LICENSECHAIN_API_KEY` (required), `LICENSECHAIN_BASE_URL`,
    /// `SOLANA_RPC_URL`, `LICENSECHAIN_TIMEOUT_MS` and `LICENSECHAIN_RETRIES`.
    /// Nothing else in the SDK touches the environment.
    pub fn from_env() -> SdkResult<Self> {
        let api_key = std::env::var("LICENSECHAIN_API_KEY")
            .map_err(|_| SdkError::validation("LICENSECHAIN_API_KEY is not set"))?;
        let mut builder = ClientConfigBuilder::new(api_key);

        if let Ok(url) = std::env::var("LICENSECHAIN_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Ok(url) = std::env::var("SOLANA_RPC_URL") {
            builder = builder.rpc_url(url);
        }
        if let Ok(ms) = std::env::var("LICENSECHAIN_TIMEOUT_MS") {
            let ms: u64 = ms.parse().map_err(|_| {
                SdkError::validation(format!("LICENSECHAIN_TIMEOUT_MS is not a number: {}", ms))
            })?;
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Ok(retries) = std::env::var("LICENSECHAIN_RETRIES") {
            let retries: u32 = retries.parse().map_err(|_| {
                SdkError::validation(format!("LICENSECHAIN_RETRIES is not a number: {}", retries))
            })?;
            builder = builder.retries(retries);
        }

        builder.build()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }
}

// The API key never appears in debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("rpc_url", &self.rpc_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("commitment", &self.commitment)
            .finish()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: String,
    rpc_url: String,
    timeout: Duration,
    retries: u32,
    retry_delay: Duration,
    commitment: Commitment,
}

impl ClientConfigBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_URL.to_string(),
            rpc_url: Cluster::default().rpc_url().to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            commitment: Commitment::default(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// Point the RPC URL at a well-known cluster.
    pub fn cluster(mut self, cluster: Cluster) -> Self {
        self.rpc_url = cluster.rpc_url().to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Duration::from_millis(ms);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn build(self) -> SdkResult<ClientConfig> {
        if self.api_key.trim().is_empty() {
            return Err(SdkError::validation("api_key is required"));
        }
        if self.timeout.is_zero() {
            return Err(SdkError::validation("timeout must be greater than zero"));
        }
        let base_url = normalize_url(&self.base_url, "base_url")?;
        let rpc_url = normalize_url(&self.rpc_url, "rpc_url")?;

        Ok(ClientConfig {
            api_key: self.api_key,
            base_url,
            rpc_url,
            timeout: self.timeout,
            retries: self.retries,
            retry_delay: self.retry_delay,
            commitment: self.commitment,
        })
    }
}

fn normalize_url(url: &str, field_name: &str) -> SdkResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(SdkError::validation(format!(
            "{} must be an http(s) URL, got '{}'",
            field_name, url
        )));
    }
    Ok(trimmed.to_string())
}
