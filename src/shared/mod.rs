//! Shared newtypes and utilities used across the RPC layer and all managers.
//!
//! Everything here is pure (no network calls) except [`retry`], which only
//! sleeps between attempts.

pub mod fees;
pub mod keys;
pub mod retry;
pub mod units;
pub mod validation;
pub mod webhook;

pub use fees::{estimate_rent_exemption, estimate_transaction_fee};
pub use keys::{derive_public_key, generate_keypair, GeneratedKeypair};
pub use retry::{retry, retry_with, RetryConfig};
pub use units::{format_units, lamports_to_sol, parse_units, sol_to_lamports};
pub use validation::{
    format_public_key, validate_amount, validate_private_key, validate_public_key,
    validate_signature, SecretKeyInput,
};
pub use webhook::{
    create_webhook_hmac, create_webhook_signature, verify_webhook_hmac, verify_webhook_signature,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{SdkError, SdkResult};

// ─── PubkeyStr ───────────────────────────────────────────────────────────────

/// A Solana public key stored as a base58 string.
///
/// Serializes transparently as a JSON string. [`PubkeyStr::parse`] is the
/// validating constructor; the `From` impls are for trusted values only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PubkeyStr(String);

impl PubkeyStr {
    /// Validate and wrap a base58 public key.
    pub fn parse(s: &str) -> SdkResult<Self> {
        format_public_key(s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_pubkey(&self) -> SdkResult<solana_pubkey::Pubkey> {
        solana_pubkey::Pubkey::from_str(&self.0)
            .map_err(|e| SdkError::validation(format!("Invalid public key '{}': {}", self.0, e)))
    }

    pub fn from_pubkey(pk: solana_pubkey::Pubkey) -> Self {
        Self(pk.to_string())
    }
}

impl std::fmt::Display for PubkeyStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PubkeyStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PubkeyStr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PubkeyStr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<solana_pubkey::Pubkey> for PubkeyStr {
    fn from(pk: solana_pubkey::Pubkey) -> Self {
        Self(pk.to_string())
    }
}

impl FromStr for PubkeyStr {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PubkeyStr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PubkeyStr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PubkeyStr(s))
    }
}
