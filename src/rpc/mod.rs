//! Solana JSON-RPC slice: typed chain entities, wire schemas, conversions.
//!
//! - `wire.rs`: raw serde structs matching JSON-RPC `result` payloads
//! - `convert.rs`: wire → entity conversions
//! - `client.rs`: [`SolanaRpc`], the passthrough calls

pub mod client;
mod convert;
pub mod wire;

pub use client::SolanaRpc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::PubkeyStr;

/// Well-known program ids used by the passthroughs.
pub mod programs {
    pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
    pub const STAKE_PROGRAM_ID: &str = "Stake11111111111111111111111111111111111111";
    pub const MEMO_PROGRAM_ID: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";
}

/// Byte offset of the staker authority inside a stake account.
pub const STAKE_STAKER_OFFSET: usize = 12;

// ─── Commitment ──────────────────────────────────────────────────────────────

/// Confirmation depth requested from (or reported by) the cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processed" => Some(Commitment::Processed),
            "confirmed" => Some(Commitment::Confirmed),
            "finalized" => Some(Commitment::Finalized),
            _ => None,
        }
    }

    /// `getTransaction`/`getBlock` reject `processed`; they get `confirmed` instead.
    pub(crate) fn at_least_confirmed(self) -> Self {
        match self {
            Commitment::Processed => Commitment::Confirmed,
            other => other,
        }
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Account ─────────────────────────────────────────────────────────────────

/// Snapshot of one account as returned by `getAccountInfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub pubkey: PubkeyStr,
    /// Balance in SOL.
    pub balance: Decimal,
    pub lamports: u64,
    pub owner: PubkeyStr,
    pub executable: bool,
    pub rent_epoch: Option<u64>,
    pub data: Vec<u8>,
    /// Slot the snapshot was taken at.
    pub slot: u64,
}

/// An executable account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub program_id: PubkeyStr,
    /// Loader that owns the program account.
    pub owner: PubkeyStr,
    pub lamports: u64,
    pub data_len: usize,
}

// ─── Transaction ─────────────────────────────────────────────────────────────

/// A transaction as seen by a send, confirm or get call.
///
/// Fields the originating call does not report are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub signature: String,
    pub slot: Option<u64>,
    pub block_time: Option<DateTime<Utc>>,
    pub confirmation_status: Option<Commitment>,
    pub confirmations: Option<u64>,
    pub fee: Option<u64>,
    pub err: Option<serde_json::Value>,
    pub memo: Option<String>,
}

impl Transaction {
    pub(crate) fn submitted(signature: String) -> Self {
        Self {
            signature,
            slot: None,
            block_time: None,
            confirmation_status: None,
            confirmations: None,
            fee: None,
            err: None,
            memo: None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.confirmation_status == Some(Commitment::Finalized)
    }
}

// ─── Token accounts ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenAccountState {
    Initialized,
    Frozen,
}

/// An SPL token account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub address: PubkeyStr,
    pub mint: PubkeyStr,
    pub owner: PubkeyStr,
    /// Human-readable amount, e.g. `"1.5"`.
    pub amount: String,
    /// Amount in base units, e.g. `"1500000"`.
    pub raw_amount: String,
    pub decimals: u8,
    pub state: TokenAccountState,
}

// ─── Blocks ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub slot: u64,
    pub blockhash: String,
    pub previous_blockhash: String,
    pub parent_slot: u64,
    pub block_time: Option<DateTime<Utc>>,
    pub block_height: Option<u64>,
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
    pub slot: u64,
}

// ─── Cluster ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub pubkey: PubkeyStr,
    pub gossip: Option<String>,
    pub tpu: Option<String>,
    pub rpc: Option<String>,
    pub version: Option<String>,
    pub feature_set: Option<u32>,
    pub shred_version: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorStatus {
    Current,
    Delinquent,
}

/// A vote account from `getVoteAccounts`, tagged current or delinquent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub vote_pubkey: PubkeyStr,
    pub node_pubkey: PubkeyStr,
    pub activated_stake: u64,
    pub commission: u8,
    pub epoch_vote_account: bool,
    pub last_vote: u64,
    pub root_slot: u64,
    pub status: ValidatorStatus,
}

impl Validator {
    pub fn is_delinquent(&self) -> bool {
        self.status == ValidatorStatus::Delinquent
    }
}

// ─── Stake ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeAccount {
    pub address: PubkeyStr,
    pub lamports: u64,
    /// Balance in SOL.
    pub balance: Decimal,
    /// Parsed account type: `initialized`, `delegated`, ...
    pub kind: String,
    pub staker: Option<PubkeyStr>,
    pub withdrawer: Option<PubkeyStr>,
    pub voter: Option<PubkeyStr>,
    pub delegated_stake: Option<u64>,
    pub activation_epoch: Option<u64>,
    pub deactivation_epoch: Option<u64>,
}

impl StakeAccount {
    /// Delegated and not yet deactivating.
    pub fn is_active(&self) -> bool {
        self.voter.is_some() && self.deactivation_epoch == Some(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_parse() {
        for c in [Commitment::Processed, Commitment::Confirmed, Commitment::Finalized] {
            assert_eq!(Commitment::parse(c.as_str()), Some(c));
        }
        assert_eq!(Commitment::parse("Finalized"), None);
        assert_eq!(Commitment::parse("max"), None);
    }

    #[test]
    fn test_at_least_confirmed() {
        assert_eq!(Commitment::Processed.at_least_confirmed(), Commitment::Confirmed);
        assert_eq!(Commitment::Finalized.at_least_confirmed(), Commitment::Finalized);
    }
}
