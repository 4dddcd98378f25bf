//! Input validation for address-shaped and amount-shaped values.
//!
//! The `validate_*` functions are total and never fail; the `require_*`
//! helpers turn a failed check into [`SdkError::Validation`] and are what
//! the managers call before issuing any request.

use crate::error::{SdkError, SdkResult};

/// The base58 alphabet used by Solana (no `0`, `O`, `I`, `l`).
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub const MIN_PUBKEY_LEN: usize = 32;
pub const MAX_PUBKEY_LEN: usize = 44;

pub const MIN_SIGNATURE_LEN: usize = 64;
pub const MAX_SIGNATURE_LEN: usize = 88;

/// Length in bytes of a Solana keypair secret (32-byte seed + 32-byte public key).
pub const SECRET_KEY_LEN: usize = 64;

fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

fn is_base58(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_base58_char)
}

/// True iff `key` is 32–44 characters from the base58 alphabet.
pub fn validate_public_key(key: &str) -> bool {
    (MIN_PUBKEY_LEN..=MAX_PUBKEY_LEN).contains(&key.len()) && is_base58(key)
}

/// Return `key` unchanged if it is a valid public key.
pub fn format_public_key(key: &str) -> SdkResult<String> {
    if validate_public_key(key) {
        Ok(key.to_string())
    } else {
        Err(SdkError::validation(format!("Invalid public key: '{}'", key)))
    }
}

/// A private key as raw bytes or as its hex encoding.
#[derive(Debug, Clone, Copy)]
pub enum SecretKeyInput<'a> {
    Bytes(&'a [u8]),
    Hex(&'a str),
}

impl SecretKeyInput<'_> {
    /// Decode into raw bytes; `None` if the hex is malformed.
    pub fn decode(&self) -> Option<Vec<u8>> {
        match self {
            SecretKeyInput::Bytes(b) => Some(b.to_vec()),
            SecretKeyInput::Hex(s) => {
                let s = s.strip_prefix("0x").unwrap_or(s);
                hex::decode(s).ok()
            }
        }
    }
}

impl<'a> From<&'a [u8]> for SecretKeyInput<'a> {
    fn from(b: &'a [u8]) -> Self {
        SecretKeyInput::Bytes(b)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SecretKeyInput<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        SecretKeyInput::Bytes(b)
    }
}

impl<'a> From<&'a Vec<u8>> for SecretKeyInput<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        SecretKeyInput::Bytes(b)
    }
}

impl<'a> From<&'a str> for SecretKeyInput<'a> {
    fn from(s: &'a str) -> Self {
        SecretKeyInput::Hex(s)
    }
}

impl<'a> From<&'a String> for SecretKeyInput<'a> {
    fn from(s: &'a String) -> Self {
        SecretKeyInput::Hex(s)
    }
}

/// True iff the key decodes to exactly 64 bytes.
pub fn validate_private_key<'a>(key: impl Into<SecretKeyInput<'a>>) -> bool {
    key.into()
        .decode()
        .is_some_and(|bytes| bytes.len() == SECRET_KEY_LEN)
}

/// True iff `sig` is a base58 transaction signature decoding to 64 bytes.
pub fn validate_signature(sig: &str) -> bool {
    if !(MIN_SIGNATURE_LEN..=MAX_SIGNATURE_LEN).contains(&sig.len()) || !is_base58(sig) {
        return false;
    }
    bs58::decode(sig)
        .into_vec()
        .is_ok_and(|bytes| bytes.len() == 64)
}

/// True iff `value` is a non-negative decimal string such as `"10"` or `"0.25"`.
pub fn validate_amount(value: &str) -> bool {
    let (whole, frac) = match value.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (value, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match frac {
        Some(f) => digits(whole) && digits(f),
        None => digits(whole),
    }
}

// ─── Preconditions ───────────────────────────────────────────────────────────

pub(crate) fn require_non_empty(value: &str, field_name: &str) -> SdkResult<()> {
    if value.trim().is_empty() {
        return Err(SdkError::validation(format!("{} is required", field_name)));
    }
    Ok(())
}

pub(crate) fn require_public_key(value: &str, field_name: &str) -> SdkResult<()> {
    require_non_empty(value, field_name)?;
    if !validate_public_key(value) {
        return Err(SdkError::validation(format!(
            "{} is not a valid public key: '{}'",
            field_name, value
        )));
    }
    Ok(())
}

pub(crate) fn require_signature(value: &str) -> SdkResult<()> {
    require_non_empty(value, "signature")?;
    if !validate_signature(value) {
        return Err(SdkError::validation(format!(
            "signature is not a valid transaction signature: '{}'",
            value
        )));
    }
    Ok(())
}

pub(crate) fn require_amount(value: &str, field_name: &str) -> SdkResult<()> {
    require_non_empty(value, field_name)?;
    if !validate_amount(value) {
        return Err(SdkError::validation(format!(
            "{} must be a non-negative decimal string, got '{}'",
            field_name, value
        )));
    }
    Ok(())
}
