//! Account keys and address derivation.
//!
//! # Security
//! - Seeds are loaded from the caller or the `LEDGER_PRIVATE_KEY` environment variable
//! - Keys are never logged or serialized
//! - Only the address and public key appear in log events

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha3::{Digest, Sha3_256};
use thiserror::Error;

use crate::identity::address::AccountAddress;
use crate::identity::encoding::decode_hex;

/// Environment variable name for the signing key seed.
pub const PRIVATE_KEY_ENV_VAR: &str = "LEDGER_PRIVATE_KEY";

/// Seed length accepted by [`Account::from_seed`].
pub const SEED_LENGTH: usize = 32;

/// Single-signature scheme suffix appended to the public key before hashing.
const ED25519_SCHEME: u8 = 0x00;

/// Errors from key material handling.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Seed has the wrong number of bytes.
    #[error("Invalid seed: expected {SEED_LENGTH} bytes, got {len}")]
    InvalidSeed { len: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Environment variable {0} not set")]
    MissingKey(&'static str),
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// An ed25519 keypair plus its derived ledger address.
pub struct Account {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl Account {
    /// Create an account from fresh OS randomness.
    pub fn generate() -> Self {
        let mut seed = [0u8; SEED_LENGTH];
        OsRng.fill_bytes(&mut seed);
        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    /// Derive an account deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8]) -> IdentityResult<Self> {
        let seed: [u8; SEED_LENGTH] = seed
            .try_into()
            .map_err(|_| IdentityError::InvalidSeed { len: seed.len() })?;
        Ok(Self::from_signing_key(SigningKey::from_bytes(&seed)))
    }

    /// Derive an account from a hex seed (with or without `0x`).
    pub fn from_seed_hex(seed_hex: &str) -> IdentityResult<Self> {
        let seed = decode_hex(seed_hex.trim())?;
        let account = Self::from_seed(&seed)?;
        tracing::info!(address = %account.address(), "Account loaded");
        Ok(account)
    }

    /// Load the account seed from `LEDGER_PRIVATE_KEY`.
    pub fn from_env() -> IdentityResult<Self> {
        let seed = std::env::var(PRIVATE_KEY_ENV_VAR)
            .map_err(|_| IdentityError::MissingKey(PRIVATE_KEY_ENV_VAR))?;
        Self::from_seed_hex(&seed)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = derive_address(&signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    /// The account address: `sha3_256(public_key || 0x00)`.
    pub fn address(&self) -> AccountAddress {
        self.address
    }

    /// Authentication key. Equal to the address for freshly created accounts.
    pub fn auth_key(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Hex of the raw public key bytes, no prefix.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key().as_bytes())
    }

    /// Hex of the 32-byte seed. Only for showing a newly created key to its owner.
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key().verify(message, signature).is_ok()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

/// Compute the address for a public key.
pub fn derive_address(public_key: &VerifyingKey) -> AccountAddress {
    derive_address_from_bytes(public_key.as_bytes())
}

pub(crate) fn derive_address_from_bytes(public_key: &[u8]) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key);
    hasher.update([ED25519_SCHEME]);
    AccountAddress::new(hasher.finalize().into())
}

/// Verify a signature against raw public key bytes.
pub fn verify_signature(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(pk_bytes) = <[u8; 32]>::try_from(public_key) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&pk_bytes) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(&sig_bytes))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; 32] = [7u8; 32];

    #[test]
    fn test_seed_is_deterministic() {
        let a = Account::from_seed(&SEED).unwrap();
        let b = Account::from_seed(&SEED).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.public_key_hex(), b.public_key_hex());
        assert_eq!(a.seed_hex(), hex::encode(SEED));
    }

    #[test]
    fn test_generated_accounts_differ() {
        assert_ne!(Account::generate().address(), Account::generate().address());
    }

    #[test]
    fn test_invalid_seed_length() {
        let err = Account::from_seed(&[1u8; 31]).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidSeed { len: 31 }));
        assert!(Account::from_seed(&[]).is_err());
        assert!(Account::from_seed_hex("0x1234").is_err());
    }

    #[test]
    fn test_address_is_sha3_of_key_and_scheme() {
        let account = Account::from_seed(&SEED).unwrap();
        let mut hasher = Sha3_256::new();
        hasher.update(account.public_key().as_bytes());
        hasher.update([0u8]);
        let expected = hex::encode(hasher.finalize());
        assert_eq!(account.address().to_string(), expected);
        assert_eq!(account.auth_key(), account.address());
        assert_eq!(account.address().to_string().len(), 64);
    }

    #[test]
    fn test_address_changes_with_one_bit() {
        let account = Account::from_seed(&SEED).unwrap();
        let mut key = *account.public_key().as_bytes();
        key[0] ^= 0x01;
        assert_ne!(derive_address_from_bytes(&key), account.address());
    }

    #[test]
    fn test_sign_and_verify() {
        let alice = Account::from_seed(&SEED).unwrap();
        let bob = Account::from_seed(&[9u8; 32]).unwrap();
        let message = b"canonical signing message";
        let signature = alice.sign(message);

        assert!(alice.verify(message, &signature));
        assert!(!bob.verify(message, &signature));
        assert!(verify_signature(
            alice.public_key().as_bytes(),
            message,
            &signature.to_bytes()
        ));
        assert!(!verify_signature(&[0u8; 3], message, &signature.to_bytes()));
    }

    #[test]
    fn test_debug_hides_secret() {
        let account = Account::from_seed(&SEED).unwrap();
        let debug = format!("{:?}", account);
        assert!(!debug.contains(&account.seed_hex()));
    }
}
