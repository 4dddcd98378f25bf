//! Webhook payload signatures.
//!
//! Two schemes live here:
//!
//! - [`create_webhook_signature`] / [`verify_webhook_signature`]: the legacy
//!   XOR-with-repeating-key + base64 format. **This is not a MAC.** Anyone who
//!   sees one payload/signature pair recovers the key. It exists only for
//!   interoperability with receivers that still expect that format.
//! - [`create_webhook_hmac`] / [`verify_webhook_hmac`]: HMAC-SHA256, hex
//!   encoded, verified in constant time. Use this across trust boundaries.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{SdkError, SdkResult};

type HmacSha256 = Hmac<Sha256>;

/// Legacy XOR+base64 signature. Insecure; see the module docs.
pub fn create_webhook_signature(payload: &str, secret: &str) -> SdkResult<String> {
    let key = secret.as_bytes();
    if key.is_empty() {
        return Err(SdkError::validation("webhook secret is required"));
    }
    let mixed: Vec<u8> = payload
        .as_bytes()
        .iter()
        .zip(key.iter().cycle())
        .map(|(p, k)| p ^ k)
        .collect();
    Ok(BASE64.encode(mixed))
}

/// Check a legacy XOR+base64 signature. Insecure; see the module docs.
pub fn verify_webhook_signature(payload: &str, signature: &str, secret: &str) -> bool {
    match create_webhook_signature(payload, secret) {
        Ok(expected) => expected == signature,
        Err(_) => false,
    }
}

/// HMAC-SHA256 of `payload` under `secret`, hex encoded.
pub fn create_webhook_hmac(payload: &[u8], secret: &[u8]) -> SdkResult<String> {
    if secret.is_empty() {
        return Err(SdkError::validation("webhook secret is required"));
    }
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SdkError::validation(format!("invalid webhook secret: {}", e)))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a hex HMAC-SHA256 signature.
pub fn verify_webhook_hmac(payload: &[u8], signature_hex: &str, secret: &[u8]) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&signature).is_ok()
}
