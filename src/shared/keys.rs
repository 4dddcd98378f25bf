//! Ed25519 keypair generation and public-key derivation.
//!
//! Secrets use the Solana keypair layout: 32-byte seed followed by the
//! 32-byte public key.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::shared::validation::SECRET_KEY_LEN;
use crate::shared::PubkeyStr;

const SEED_LEN: usize = 32;

/// A freshly generated keypair.
pub struct GeneratedKeypair {
    pub public_key: PubkeyStr,
    /// 64-byte Solana keypair secret (seed || public key).
    pub secret_key: [u8; SECRET_KEY_LEN],
}

impl GeneratedKeypair {
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }
}

impl std::fmt::Debug for GeneratedKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedKeypair")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Generate a new ed25519 keypair from the OS RNG.
pub fn generate_keypair() -> GeneratedKeypair {
    let signing_key = SigningKey::generate(&mut OsRng);
    GeneratedKeypair {
        public_key: public_key_of(&signing_key),
        secret_key: signing_key.to_keypair_bytes(),
    }
}

/// Derive the public key from a 32-byte seed or a 64-byte keypair secret.
///
/// For 64-byte input the embedded public key must match the derived one.
pub fn derive_public_key(secret: &[u8]) -> SdkResult<PubkeyStr> {
    let signing_key = match secret.len() {
        SEED_LEN => {
            let mut seed = [0u8; SEED_LEN];
            seed.copy_from_slice(secret);
            SigningKey::from_bytes(&seed)
        }
        SECRET_KEY_LEN => {
            let mut bytes = [0u8; SECRET_KEY_LEN];
            bytes.copy_from_slice(secret);
            SigningKey::from_keypair_bytes(&bytes).map_err(|_| {
                SdkError::validation("secret key does not match its embedded public key")
            })?
        }
        other => {
            return Err(SdkError::validation(format!(
                "secret key must be {} or {} bytes, got {}",
                SEED_LEN, SECRET_KEY_LEN, other
            )))
        }
    };
    Ok(public_key_of(&signing_key))
}

fn public_key_of(signing_key: &SigningKey) -> PubkeyStr {
    PubkeyStr::from_pubkey(Pubkey::new_from_array(signing_key.verifying_key().to_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::{validate_private_key, validate_public_key};

    #[test]
    fn test_generate_keypair_shapes() {
        let kp = generate_keypair();
        assert!(validate_public_key(kp.public_key.as_str()));
        assert!(validate_private_key(&kp.secret_key));
        assert!(validate_private_key(kp.secret_key_hex().as_str()));
        // Trailing 32 bytes are the public key.
        let public_bytes = kp.public_key.to_pubkey().unwrap().to_bytes();
        assert_eq!(kp.secret_key[32..], public_bytes[..]);
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(generate_keypair().public_key, generate_keypair().public_key);
    }

    #[test]
    fn test_derive_from_keypair_and_seed_agree() {
        let kp = generate_keypair();
        assert_eq!(derive_public_key(&kp.secret_key).unwrap(), kp.public_key);
        assert_eq!(derive_public_key(&kp.secret_key[..32]).unwrap(), kp.public_key);
    }

    #[test]
    fn test_derive_rejects_mismatched_keypair() {
        let mut secret = generate_keypair().secret_key;
        secret[40] ^= 0xff;
        assert!(derive_public_key(&secret).is_err());
    }

    #[test]
    fn test_derive_rejects_bad_length() {
        let err = derive_public_key(&[1u8; 10]).unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let kp = generate_keypair();
        assert!(!format!("{:?}", kp).contains(&kp.secret_key_hex()));
    }
}
