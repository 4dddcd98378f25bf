//! Conversions from JSON-RPC wire types to chain entities.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use num_bigint::BigInt;

use super::wire;
use super::{
    Account, Block, Blockhash, ClusterNode, Commitment, Program, StakeAccount, TokenAccount,
    TokenAccountState, Transaction, Validator, ValidatorStatus,
};
use crate::error::{SdkError, SdkResult};
use crate::http::RPC_PARSE_ERROR;
use crate::shared::{format_units, lamports_to_sol, PubkeyStr};

const MEMO_LOG_PREFIX: &str = "Program log: Memo";

fn parse_error(message: String) -> SdkError {
    SdkError::Rpc {
        rpc_code: RPC_PARSE_ERROR,
        message,
        data: None,
    }
}

fn block_time(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| Utc.timestamp_opt(s, 0).single())
}

fn parse_u64(field: &str, value: &str) -> SdkResult<u64> {
    value
        .parse()
        .map_err(|_| parse_error(format!("{} is not an integer: '{}'", field, value)))
}

/// Pull the memo text out of `Program log: Memo (len N): "text"` log lines.
pub(crate) fn extract_memo(logs: &[String]) -> Option<String> {
    logs.iter().find_map(|line| {
        let rest = line.strip_prefix(MEMO_LOG_PREFIX)?;
        let text = match rest.find("): ") {
            Some(idx) => &rest[idx + 3..],
            None => rest.trim_start_matches(':'),
        };
        let text = text.trim();
        let text = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);
        Some(text.to_string())
    })
}

// ─── Accounts ────────────────────────────────────────────────────────────────

impl TryFrom<(&str, u64, wire::AccountInfo)> for Account {
    type Error = SdkError;

    fn try_from((pubkey, slot, info): (&str, u64, wire::AccountInfo)) -> SdkResult<Self> {
        let data = match info.data.first() {
            Some(payload) if !payload.is_empty() => BASE64
                .decode(payload)
                .map_err(|e| parse_error(format!("Account data for {} is not base64: {}", pubkey, e)))?,
            _ => Vec::new(),
        };
        Ok(Self {
            pubkey: PubkeyStr::from(pubkey),
            balance: lamports_to_sol(info.lamports),
            lamports: info.lamports,
            owner: PubkeyStr::from(info.owner),
            executable: info.executable,
            rent_epoch: info.rent_epoch,
            data,
            slot,
        })
    }
}

impl From<Account> for Program {
    fn from(account: Account) -> Self {
        Self {
            program_id: account.pubkey,
            owner: account.owner,
            lamports: account.lamports,
            data_len: account.data.len(),
        }
    }
}

impl TryFrom<wire::KeyedAccount<wire::ParsedAccountInfo<wire::ParsedTokenAccount>>> for TokenAccount {
    type Error = SdkError;

    fn try_from(
        keyed: wire::KeyedAccount<wire::ParsedAccountInfo<wire::ParsedTokenAccount>>,
    ) -> SdkResult<Self> {
        let info = keyed.account.data.parsed.info;
        let state = match info.state.as_str() {
            "initialized" => TokenAccountState::Initialized,
            "frozen" => TokenAccountState::Frozen,
            other => {
                return Err(parse_error(format!(
                    "Token account {} has unexpected state '{}'",
                    keyed.pubkey, other
                )))
            }
        };
        let raw = BigInt::parse_bytes(info.token_amount.amount.as_bytes(), 10).ok_or_else(|| {
            parse_error(format!(
                "Token amount is not an integer: '{}'",
                info.token_amount.amount
            ))
        })?;

        Ok(Self {
            address: PubkeyStr::from(keyed.pubkey),
            mint: PubkeyStr::from(info.mint),
            owner: PubkeyStr::from(info.owner),
            amount: format_units(&raw, info.token_amount.decimals as u32),
            raw_amount: info.token_amount.amount,
            decimals: info.token_amount.decimals,
            state,
        })
    }
}

impl TryFrom<wire::KeyedAccount<wire::ParsedAccountInfo<wire::ParsedStakeAccount>>> for StakeAccount {
    type Error = SdkError;

    fn try_from(
        keyed: wire::KeyedAccount<wire::ParsedAccountInfo<wire::ParsedStakeAccount>>,
    ) -> SdkResult<Self> {
        let lamports = keyed.account.lamports;
        let parsed = keyed.account.data.parsed;
        let mut stake = Self {
            address: PubkeyStr::from(keyed.pubkey),
            lamports,
            balance: lamports_to_sol(lamports),
            kind: parsed.kind,
            staker: None,
            withdrawer: None,
            voter: None,
            delegated_stake: None,
            activation_epoch: None,
            deactivation_epoch: None,
        };

        if let Some(info) = parsed.info {
            stake.staker = Some(PubkeyStr::from(info.meta.authorized.staker));
            stake.withdrawer = Some(PubkeyStr::from(info.meta.authorized.withdrawer));
            if let Some(state) = info.stake {
                let d = state.delegation;
                stake.delegated_stake = Some(parse_u64("stake", &d.stake)?);
                stake.activation_epoch = Some(parse_u64("activationEpoch", &d.activation_epoch)?);
                stake.deactivation_epoch =
                    Some(parse_u64("deactivationEpoch", &d.deactivation_epoch)?);
                stake.voter = Some(PubkeyStr::from(d.voter));
            }
        }
        Ok(stake)
    }
}

// ─── Transactions ────────────────────────────────────────────────────────────

impl From<(&str, wire::SignatureStatus)> for Transaction {
    fn from((signature, status): (&str, wire::SignatureStatus)) -> Self {
        Self {
            signature: signature.to_string(),
            slot: Some(status.slot),
            block_time: None,
            confirmation_status: status
                .confirmation_status
                .as_deref()
                .and_then(Commitment::parse),
            confirmations: status.confirmations,
            fee: None,
            err: status.err,
            memo: None,
        }
    }
}

impl From<(&str, Commitment, wire::ConfirmedTransaction)> for Transaction {
    fn from((signature, commitment, tx): (&str, Commitment, wire::ConfirmedTransaction)) -> Self {
        let meta = tx.meta.unwrap_or(wire::TransactionMeta {
            err: None,
            fee: None,
            log_messages: None,
        });
        Self {
            signature: signature.to_string(),
            slot: Some(tx.slot),
            block_time: block_time(tx.block_time),
            // getTransaction only returns transactions that reached the requested commitment.
            confirmation_status: Some(commitment),
            confirmations: None,
            fee: meta.fee,
            err: meta.err,
            memo: meta.log_messages.as_deref().and_then(extract_memo),
        }
    }
}

// ─── Blocks & cluster ────────────────────────────────────────────────────────

impl From<(u64, wire::BlockResponse)> for Block {
    fn from((slot, b): (u64, wire::BlockResponse)) -> Self {
        Self {
            slot,
            blockhash: b.blockhash,
            previous_blockhash: b.previous_blockhash,
            parent_slot: b.parent_slot,
            block_time: block_time(b.block_time),
            block_height: b.block_height,
            signatures: b.signatures,
        }
    }
}

impl From<wire::WithContext<wire::LatestBlockhash>> for Blockhash {
    fn from(w: wire::WithContext<wire::LatestBlockhash>) -> Self {
        Self {
            blockhash: w.value.blockhash,
            last_valid_block_height: w.value.last_valid_block_height,
            slot: w.context.slot,
        }
    }
}

impl From<wire::ClusterNodeResponse> for ClusterNode {
    fn from(n: wire::ClusterNodeResponse) -> Self {
        Self {
            pubkey: PubkeyStr::from(n.pubkey),
            gossip: n.gossip,
            tpu: n.tpu,
            rpc: n.rpc,
            version: n.version,
            feature_set: n.feature_set,
            shred_version: n.shred_version,
        }
    }
}

impl From<(wire::VoteAccount, ValidatorStatus)> for Validator {
    fn from((v, status): (wire::VoteAccount, ValidatorStatus)) -> Self {
        Self {
            vote_pubkey: PubkeyStr::from(v.vote_pubkey),
            node_pubkey: PubkeyStr::from(v.node_pubkey),
            activated_stake: v.activated_stake,
            commission: v.commission,
            epoch_vote_account: v.epoch_vote_account,
            last_vote: v.last_vote,
            root_slot: v.root_slot,
            status,
        }
    }
}

impl From<wire::VoteAccounts> for Vec<Validator> {
    fn from(accounts: wire::VoteAccounts) -> Self {
        accounts
            .current
            .into_iter()
            .map(|v| Validator::from((v, ValidatorStatus::Current)))
            .chain(
                accounts
                    .delinquent
                    .into_iter()
                    .map(|v| Validator::from((v, ValidatorStatus::Delinquent))),
            )
            .collect()
    }
}
