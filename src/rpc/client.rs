//! Solana RPC sub-client: direct JSON-RPC passthroughs.
//!
//! Each call validates address-shaped inputs, issues one JSON-RPC request and
//! reshapes the `result` into a typed entity. A missing `value` becomes the
//! resource's not-found error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

use super::programs::{STAKE_PROGRAM_ID, TOKEN_PROGRAM_ID};
use super::wire::{self, decode};
use super::{
    Account, Block, Blockhash, ClusterNode, Commitment, Program, StakeAccount, TokenAccount,
    Transaction, Validator, STAKE_STAKER_OFFSET,
};
use crate::error::{SdkError, SdkResult};
use crate::http::LicenseChainHttp;
use crate::shared::validation::{require_non_empty, require_public_key, require_signature};

/// Sub-client for Solana JSON-RPC queries.
#[derive(Clone)]
pub struct SolanaRpc {
    http: LicenseChainHttp,
}

impl SolanaRpc {
    pub fn new(http: LicenseChainHttp) -> Self {
        Self { http }
    }

    fn commitment(&self) -> Commitment {
        self.http.config().commitment()
    }

    // ── Accounts ─────────────────────────────────────────────────────────

    /// Fetch one account; a `null` value is [`SdkError::Account`].
    pub async fn get_account(&self, pubkey: &str) -> SdkResult<Account> {
        require_public_key(pubkey, "pubkey")?;
        let result = self
            .http
            .rpc_call(
                "getAccountInfo",
                json!([pubkey, { "encoding": "base64", "commitment": self.commitment() }]),
            )
            .await?;

        let parsed: wire::WithContext<Option<wire::AccountInfo>> = decode("getAccountInfo", result)?;
        let info = parsed
            .value
            .ok_or_else(|| SdkError::account_not_found(pubkey))?;
        Account::try_from((pubkey, parsed.context.slot, info))
    }

    /// Balance in lamports.
    pub async fn get_balance(&self, pubkey: &str) -> SdkResult<u64> {
        require_public_key(pubkey, "pubkey")?;
        let result = self
            .http
            .rpc_call(
                "getBalance",
                json!([pubkey, { "commitment": self.commitment() }]),
            )
            .await?;

        let parsed: wire::WithContext<Option<u64>> = decode("getBalance", result)?;
        parsed.value.ok_or_else(|| SdkError::account_not_found(pubkey))
    }

    /// SPL token accounts of `owner`, optionally restricted to one mint.
    pub async fn get_token_accounts_by_owner(
        &self,
        owner: &str,
        mint: Option<&str>,
    ) -> SdkResult<Vec<TokenAccount>> {
        require_public_key(owner, "owner")?;
        let filter = match mint {
            Some(mint) => {
                require_public_key(mint, "mint")?;
                json!({ "mint": mint })
            }
            None => json!({ "programId": TOKEN_PROGRAM_ID }),
        };

        let result = self
            .http
            .rpc_call(
                "getTokenAccountsByOwner",
                json!([owner, filter, { "encoding": "jsonParsed", "commitment": self.commitment() }]),
            )
            .await?;

        let parsed: wire::WithContext<
            Option<Vec<wire::KeyedAccount<wire::ParsedAccountInfo<wire::ParsedTokenAccount>>>>,
        > = decode("getTokenAccountsByOwner", result)?;
        let accounts = parsed
            .value
            .ok_or_else(|| SdkError::account_not_found(owner))?;
        accounts.into_iter().map(TokenAccount::try_from).collect()
    }

    /// Executable account at `program_id`.
    pub async fn get_program(&self, program_id: &str) -> SdkResult<Program> {
        let account = self.get_account(program_id).await?;
        if !account.executable {
            return Err(SdkError::Account {
                message: format!("Account {} is not an executable program", program_id),
                account: Some(program_id.to_string()),
            });
        }
        Ok(account.into())
    }

    /// Stake accounts whose staker authority is `owner`.
    pub async fn get_stake_accounts(&self, owner: &str) -> SdkResult<Vec<StakeAccount>> {
        require_public_key(owner, "owner")?;
        let result = self
            .http
            .rpc_call(
                "getProgramAccounts",
                json!([STAKE_PROGRAM_ID, {
                    "encoding": "jsonParsed",
                    "commitment": self.commitment(),
                    "filters": [{ "memcmp": { "offset": STAKE_STAKER_OFFSET, "bytes": owner } }]
                }]),
            )
            .await?;

        let accounts: Vec<wire::KeyedAccount<wire::ParsedAccountInfo<wire::ParsedStakeAccount>>> =
            decode("getProgramAccounts", result)?;
        accounts.into_iter().map(StakeAccount::try_from).collect()
    }

    // ── Transactions ─────────────────────────────────────────────────────

    /// Submit a base64-encoded, already signed wire transaction.
    pub async fn send_transaction(&self, transaction_base64: &str) -> SdkResult<Transaction> {
        require_non_empty(transaction_base64, "transaction")?;
        BASE64
            .decode(transaction_base64)
            .map_err(|e| SdkError::validation(format!("transaction is not valid base64: {}", e)))?;

        let result = self
            .http
            .rpc_call(
                "sendTransaction",
                json!([transaction_base64, {
                    "encoding": "base64",
                    "preflightCommitment": self.commitment()
                }]),
            )
            .await
            .map_err(|e| match e {
                SdkError::Rpc { rpc_code, message, data } => SdkError::Transaction {
                    message: format!("sendTransaction failed ({}): {}", rpc_code, message),
                    signature: None,
                    details: data,
                },
                other => other,
            })?;

        let signature: String = decode("sendTransaction", result)?;
        tracing::debug!(signature = %signature, "Transaction submitted");
        Ok(Transaction::submitted(signature))
    }

    /// Serialize a signed transaction and submit it.
    pub async fn send_signed_transaction(
        &self,
        transaction: &solana_transaction::Transaction,
    ) -> SdkResult<Transaction> {
        if transaction.signatures.is_empty() {
            return Err(SdkError::validation("transaction has no signatures"));
        }
        let bytes = bincode::serialize(transaction)
            .map_err(|e| SdkError::Serialization(format!("Failed to serialize transaction: {}", e)))?;
        self.send_transaction(&BASE64.encode(bytes)).await
    }

    /// Current status of `signature`. Unknown signatures and failed
    /// transactions are [`SdkError::Transaction`].
    pub async fn confirm_transaction(&self, signature: &str) -> SdkResult<Transaction> {
        require_signature(signature)?;
        let result = self
            .http
            .rpc_call(
                "getSignatureStatuses",
                json!([[signature], { "searchTransactionHistory": true }]),
            )
            .await?;

        let parsed: wire::WithContext<Vec<Option<wire::SignatureStatus>>> =
            decode("getSignatureStatuses", result)?;
        let status = parsed
            .value
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| SdkError::transaction_not_found(signature))?;

        if let Some(err) = status.err.clone() {
            return Err(SdkError::Transaction {
                message: format!("Transaction {} failed", signature),
                signature: Some(signature.to_string()),
                details: Some(err),
            });
        }
        Ok(Transaction::from((signature, status)))
    }

    /// Fetch a confirmed transaction, including its memo if one was logged.
    pub async fn get_transaction(&self, signature: &str) -> SdkResult<Transaction> {
        require_signature(signature)?;
        let commitment = self.commitment().at_least_confirmed();
        let result = self
            .http
            .rpc_call(
                "getTransaction",
                json!([signature, {
                    "encoding": "json",
                    "commitment": commitment,
                    "maxSupportedTransactionVersion": 0
                }]),
            )
            .await?;

        let tx: Option<wire::ConfirmedTransaction> = decode("getTransaction", result)?;
        let tx = tx.ok_or_else(|| SdkError::transaction_not_found(signature))?;
        Ok(Transaction::from((signature, commitment, tx)))
    }

    // ── Blocks & cluster ─────────────────────────────────────────────────

    pub async fn get_block(&self, slot: u64) -> SdkResult<Block> {
        let result = self
            .http
            .rpc_call(
                "getBlock",
                json!([slot, {
                    "encoding": "json",
                    "transactionDetails": "signatures",
                    "rewards": false,
                    "commitment": self.commitment().at_least_confirmed(),
                    "maxSupportedTransactionVersion": 0
                }]),
            )
            .await?;

        let block: Option<wire::BlockResponse> = decode("getBlock", result)?;
        let block = block.ok_or_else(|| SdkError::Rpc {
            rpc_code: BLOCK_NOT_AVAILABLE,
            message: format!("Block not available for slot {}", slot),
            data: None,
        })?;
        Ok(Block::from((slot, block)))
    }

    pub async fn get_latest_blockhash(&self) -> SdkResult<Blockhash> {
        let result = self
            .http
            .rpc_call(
                "getLatestBlockhash",
                json!([{ "commitment": self.commitment() }]),
            )
            .await?;

        let parsed: wire::WithContext<wire::LatestBlockhash> = decode("getLatestBlockhash", result)?;
        Ok(parsed.into())
    }

    pub async fn get_cluster_info(&self) -> SdkResult<Vec<ClusterNode>> {
        let result = self.http.rpc_call("getClusterNodes", json!([])).await?;
        let nodes: Vec<wire::ClusterNodeResponse> = decode("getClusterNodes", result)?;
        Ok(nodes.into_iter().map(ClusterNode::from).collect())
    }

    /// Current and delinquent vote accounts, current first.
    pub async fn get_validators(&self) -> SdkResult<Vec<Validator>> {
        let result = self
            .http
            .rpc_call(
                "getVoteAccounts",
                json!([{ "commitment": self.commitment() }]),
            )
            .await?;

        let accounts: wire::VoteAccounts = decode("getVoteAccounts", result)?;
        Ok(accounts.into())
    }
}

/// Code Solana nodes use for a skipped or unavailable block.
pub const BLOCK_NOT_AVAILABLE: i64 = -32004;
