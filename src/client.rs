//! High-level client: `LicenseChainClient` with nested sub-client accessors.
//!
//! Each REST domain has its own sub-client in `domain/<name>/client.rs`; the
//! Solana passthroughs live in [`SolanaRpc`]. This module keeps the builder,
//! the accessors and the facade methods that forward to the RPC sub-client.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::domain::defi::client::Defi;
use crate::domain::license::client::Licenses;
use crate::domain::nft::client::Nfts;
use crate::error::SdkResult;
use crate::http::LicenseChainHttp;
use crate::network::Cluster;
use crate::rpc::{
    Account, Block, Blockhash, ClusterNode, Commitment, Program, SolanaRpc, StakeAccount,
    TokenAccount, Transaction, Validator,
};
use crate::shared::{retry_with, RetryConfig};

// Re-export sub-client types for convenience.
pub use crate::domain::defi::client::Defi as DefiClient;
pub use crate::domain::license::client::Licenses as LicensesClient;
pub use crate::domain::nft::client::Nfts as NftsClient;

/// The primary entry point for the LicenseChain SDK.
///
/// Provides nested sub-client accessors for each REST domain
/// (`client.licenses()`, `client.nfts()`, `client.defi()`) and the Solana
/// JSON-RPC passthroughs directly on the client.
#[derive(Clone)]
pub struct LicenseChainClient {
    pub(crate) http: LicenseChainHttp,
    rpc: SolanaRpc,
}

impl LicenseChainClient {
    pub fn builder(api_key: impl Into<String>) -> LicenseChainClientBuilder {
        LicenseChainClientBuilder::new(api_key)
    }

    /// Build a client from an existing configuration.
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        let http = LicenseChainHttp::new(Arc::new(config))?;
        Ok(Self {
            rpc: SolanaRpc::new(http.clone()),
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// The configuration shared with every sub-client.
    pub fn shared_config(&self) -> Arc<ClientConfig> {
        self.http.shared_config()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn licenses(&self) -> Licenses<'_> {
        Licenses { client: self }
    }

    pub fn nfts(&self) -> Nfts<'_> {
        Nfts { client: self }
    }

    pub fn defi(&self) -> Defi<'_> {
        Defi { client: self }
    }

    pub fn rpc(&self) -> &SolanaRpc {
        &self.rpc
    }

    // ── Retry ────────────────────────────────────────────────────────────

    /// Retry policy derived from the configured `retries` and `retry_delay`.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(self.config().retries()).with_base_delay(self.config().retry_delay())
    }

    /// Run `operation` under [`retry_config`](Self::retry_config). Nothing
    /// is retried unless wrapped this way.
    pub async fn with_retries<T, F, Fut>(&self, operation: F) -> SdkResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SdkResult<T>>,
    {
        retry_with(self.retry_config(), operation).await
    }

    // ── Solana RPC passthroughs ──────────────────────────────────────────

    pub async fn get_account(&self, pubkey: &str) -> SdkResult<Account> {
        self.rpc.get_account(pubkey).await
    }

    /// Balance in lamports.
    pub async fn get_balance(&self, pubkey: &str) -> SdkResult<u64> {
        self.rpc.get_balance(pubkey).await
    }

    pub async fn get_token_accounts_by_owner(
        &self,
        owner: &str,
        mint: Option<&str>,
    ) -> SdkResult<Vec<TokenAccount>> {
        self.rpc.get_token_accounts_by_owner(owner, mint).await
    }

    pub async fn send_transaction(&self, transaction_base64: &str) -> SdkResult<Transaction> {
        self.rpc.send_transaction(transaction_base64).await
    }

    pub async fn send_signed_transaction(
        &self,
        transaction: &solana_transaction::Transaction,
    ) -> SdkResult<Transaction> {
        self.rpc.send_signed_transaction(transaction).await
    }

    pub async fn confirm_transaction(&self, signature: &str) -> SdkResult<Transaction> {
        self.rpc.confirm_transaction(signature).await
    }

    pub async fn get_transaction(&self, signature: &str) -> SdkResult<Transaction> {
        self.rpc.get_transaction(signature).await
    }

    pub async fn get_program(&self, program_id: &str) -> SdkResult<Program> {
        self.rpc.get_program(program_id).await
    }

    pub async fn get_block(&self, slot: u64) -> SdkResult<Block> {
        self.rpc.get_block(slot).await
    }

    pub async fn get_latest_blockhash(&self) -> SdkResult<Blockhash> {
        self.rpc.get_latest_blockhash().await
    }

    pub async fn get_cluster_info(&self) -> SdkResult<Vec<ClusterNode>> {
        self.rpc.get_cluster_info().await
    }

    pub async fn get_validators(&self) -> SdkResult<Vec<Validator>> {
        self.rpc.get_validators().await
    }

    pub async fn get_stake_accounts(&self, owner: &str) -> SdkResult<Vec<StakeAccount>> {
        self.rpc.get_stake_accounts(owner).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct LicenseChainClientBuilder {
    config: ClientConfigBuilder,
}

impl LicenseChainClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: ClientConfigBuilder::new(api_key),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.rpc_url(url);
        self
    }

    pub fn cluster(mut self, cluster: Cluster) -> Self {
        self.config = self.config.cluster(cluster);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.config = self.config.retries(retries);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.retry_delay(delay);
        self
    }

    pub fn commitment(mut self, commitment: Commitment) -> Self {
        self.config = self.config.commitment(commitment);
        self
    }

    pub fn build(self) -> SdkResult<LicenseChainClient> {
        LicenseChainClient::new(self.config.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    #[test]
    fn test_builder_applies_config() {
        let client = LicenseChainClient::builder("key")
            .base_url("http://localhost:8080/")
            .cluster(Cluster::Mainnet)
            .retries(5)
            .retry_delay(Duration::from_millis(10))
            .commitment(Commitment::Finalized)
            .build()
            .unwrap();

        assert_eq!(client.config().base_url(), "http://localhost:8080");
        assert_eq!(client.config().rpc_url(), Cluster::Mainnet.rpc_url());
        assert_eq!(client.config().commitment(), Commitment::Finalized);
        assert_eq!(client.retry_config().max_attempts, 5);
        assert_eq!(client.retry_config().base_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_builder_rejects_empty_key() {
        let err = LicenseChainClient::builder("").build().err().unwrap();
        assert!(matches!(err, SdkError::Validation(_)));
    }

    #[test]
    fn test_sub_clients_share_one_config() {
        let client = LicenseChainClient::builder("key").build().unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.shared_config(), &clone.shared_config()));
    }
}
