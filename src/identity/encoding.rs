//! Hex helpers for the ledger's JSON wire format.
//!
//! Byte-string arguments nested inside a payload's argument list are hex
//! without a prefix. Top-level hex fields (public key, signature, sender)
//! carry a `0x` prefix.

use crate::identity::account::{IdentityError, IdentityResult};

/// Hex-encode UTF-8 text for use as a payload argument (no prefix).
pub fn hex_encode_utf8(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Hex-encode bytes with a leading `0x`.
pub fn to_hex_literal(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex, with or without a `0x` prefix.
pub fn decode_hex(input: &str) -> IdentityResult<Vec<u8>> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(digits).map_err(|e| IdentityError::InvalidHex(e.to_string()))
}
