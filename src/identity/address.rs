//! Account address type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::identity::account::IdentityError;
use crate::identity::encoding::decode_hex;

/// Length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte ledger account address.
///
/// Displays as lowercase hex without a prefix; use [`AccountAddress::to_hex_literal`]
/// where the ledger expects the `0x` form (sender field, payload arguments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lowercase hex, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Lowercase hex with a `0x` prefix.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", self.to_hex())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        let bytes: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| IdentityError::InvalidAddress(format!("expected 32 bytes, got {}", b.len())))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccountAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_literal() {
        let addr = AccountAddress::new([0xab; 32]);
        assert_eq!(addr.to_string(), "ab".repeat(32));
        assert_eq!(addr.to_hex_literal(), format!("0x{}", "ab".repeat(32)));
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let hex = "01".repeat(32);
        let a: AccountAddress = hex.parse().unwrap();
        let b: AccountAddress = format!("0x{}", hex).parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_wrong_length() {
        let err = "0x1234".parse::<AccountAddress>().unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes"));
    }

    #[test]
    fn test_serde_uses_prefixed_form() {
        let addr = AccountAddress::new([1; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(32)));
        let back: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
