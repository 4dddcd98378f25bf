//! Wire types for Solana JSON-RPC `result` payloads.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{SdkError, SdkResult};
use crate::http::RPC_PARSE_ERROR;

/// Decode an RPC `result` into its wire type; a shape mismatch is an RPC parse error.
pub(crate) fn decode<T: DeserializeOwned>(method: &str, result: serde_json::Value) -> SdkResult<T> {
    serde_json::from_value(result).map_err(|e| SdkError::Rpc {
        rpc_code: RPC_PARSE_ERROR,
        message: format!("Unexpected {} result: {}", method, e),
        data: None,
    })
}

// ─── Envelopes ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct RpcContext {
    pub slot: u64,
}

/// `{ context, value }` wrapper used by most account-level methods.
#[derive(Deserialize, Debug, Clone)]
pub struct WithContext<T> {
    pub context: RpcContext,
    pub value: T,
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub lamports: u64,
    pub owner: String,
    pub executable: bool,
    #[serde(default)]
    pub rent_epoch: Option<u64>,
    /// `[payload, encoding]`, requested as base64.
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub space: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct KeyedAccount<A> {
    pub pubkey: String,
    pub account: A,
}

/// Account whose `data` was requested as `jsonParsed`.
#[derive(Deserialize, Debug, Clone)]
pub struct ParsedAccountInfo<P> {
    pub lamports: u64,
    pub owner: String,
    pub data: ParsedData<P>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParsedData<P> {
    pub program: String,
    pub parsed: P,
}

// ─── SPL token ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct ParsedTokenAccount {
    pub info: TokenAccountInfo,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountInfo {
    pub mint: String,
    pub owner: String,
    pub state: String,
    pub token_amount: TokenAmount,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub amount: String,
    pub decimals: u8,
    #[serde(default)]
    pub ui_amount_string: Option<String>,
}

// ─── Stake ───────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct ParsedStakeAccount {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub info: Option<StakeInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StakeInfo {
    pub meta: StakeMeta,
    #[serde(default)]
    pub stake: Option<StakeState>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StakeMeta {
    pub authorized: StakeAuthorized,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StakeAuthorized {
    pub staker: String,
    pub withdrawer: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StakeState {
    pub delegation: StakeDelegation,
}

/// jsonParsed renders the numeric fields of a delegation as strings.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StakeDelegation {
    pub voter: String,
    pub stake: String,
    pub activation_epoch: String,
    pub deactivation_epoch: String,
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    #[serde(default)]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedTransaction {
    pub slot: u64,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub fee: Option<u64>,
    #[serde(default)]
    pub log_messages: Option<Vec<String>>,
}

// ─── Blocks ──────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub blockhash: String,
    pub previous_blockhash: String,
    pub parent_slot: u64,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub signatures: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

// ─── Cluster ─────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNodeResponse {
    pub pubkey: String,
    #[serde(default)]
    pub gossip: Option<String>,
    #[serde(default)]
    pub tpu: Option<String>,
    #[serde(default)]
    pub rpc: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub feature_set: Option<u32>,
    #[serde(default)]
    pub shred_version: Option<u16>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VoteAccounts {
    pub current: Vec<VoteAccount>,
    pub delinquent: Vec<VoteAccount>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VoteAccount {
    pub vote_pubkey: String,
    pub node_pubkey: String,
    pub activated_stake: u64,
    pub commission: u8,
    pub epoch_vote_account: bool,
    pub last_vote: u64,
    pub root_slot: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_mismatch_is_rpc_parse_error() {
        let err = decode::<WithContext<u64>>("getBalance", json!({"value": "lots"})).unwrap_err();
        match err {
            SdkError::Rpc { rpc_code, .. } => assert_eq!(rpc_code, RPC_PARSE_ERROR),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_value_decodes_to_none() {
        let parsed: WithContext<Option<AccountInfo>> =
            decode("getAccountInfo", json!({"context": {"slot": 7}, "value": null})).unwrap();
        assert_eq!(parsed.context.slot, 7);
        assert!(parsed.value.is_none());
    }

    #[test]
    fn test_parsed_token_account() {
        let raw = json!({
            "pubkey": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            "account": {
                "lamports": 2039280,
                "owner": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
                "data": {
                    "program": "spl-token",
                    "parsed": {
                        "type": "account",
                        "info": {
                            "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                            "owner": "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T",
                            "state": "initialized",
                            "tokenAmount": {"amount": "1500000", "decimals": 6, "uiAmountString": "1.5"}
                        }
                    }
                }
            }
        });
        let acct: KeyedAccount<ParsedAccountInfo<ParsedTokenAccount>> =
            decode("getTokenAccountsByOwner", raw).unwrap();
        assert_eq!(acct.account.data.parsed.info.token_amount.amount, "1500000");
        assert_eq!(acct.account.data.parsed.kind, "account");
    }
}
